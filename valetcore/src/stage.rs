use core::fmt;

use crate::{
    frame::{Frame, TrajectoryPoint},
    planner::TrajectoryPlanner,
    vehicle_state::VehicleStateProvider,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageKind {
    ApproachingParkingSpot,
    Parking,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::ApproachingParkingSpot => write!(f, "VALET_PARKING_APPROACHING_PARKING_SPOT"),
            StageKind::Parking => write!(f, "VALET_PARKING_PARKING"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    Running,
    Finished,
    Error,
}

/// Collaborators injected into a stage for one planning cycle.
pub struct PlanningEnv<'a> {
    pub planner: &'a mut dyn TrajectoryPlanner,
    pub vehicle_state: &'a dyn VehicleStateProvider,
}

impl<'a> PlanningEnv<'a> {
    pub fn new(
        planner: &'a mut dyn TrajectoryPlanner,
        vehicle_state: &'a dyn VehicleStateProvider,
    ) -> Self {
        Self {
            planner,
            vehicle_state,
        }
    }
}

/// A state of a scenario, processed once per planning cycle.
pub trait Stage {
    /// Data shared by all stages of a scenario instance.
    type Context;

    fn kind(&self) -> StageKind;

    /// Stage to switch to after this stage returned [`StageStatus::Finished`].
    fn next_stage(&self) -> Option<StageKind>;

    fn process(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
        context: &mut Self::Context,
        env: &mut PlanningEnv<'_>,
    ) -> StageStatus;
}
