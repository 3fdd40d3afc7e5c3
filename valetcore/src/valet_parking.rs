mod approaching;
mod context;
mod parking;

pub use approaching::ApproachingParkingSpot;
pub use context::ValetParkingContext;
pub use parking::Parking;

use uom::si::f32::Length;

use crate::{
    config::ValetParkingConfig,
    frame::{Frame, ReferenceLineInfo, TrajectoryPoint},
    scenario::Scenario,
    stage::{PlanningEnv, Stage, StageKind, StageStatus},
};

#[derive(Clone, Debug)]
pub enum ValetParkingStage {
    ApproachingParkingSpot(ApproachingParkingSpot),
    Parking(Parking),
}

impl ValetParkingStage {
    pub fn create(kind: StageKind, config: &ValetParkingConfig) -> Self {
        match kind {
            StageKind::ApproachingParkingSpot => {
                Self::ApproachingParkingSpot(ApproachingParkingSpot::new(*config))
            }
            StageKind::Parking => Self::Parking(Parking::new()),
        }
    }
}

impl Stage for ValetParkingStage {
    type Context = ValetParkingContext;

    fn kind(&self) -> StageKind {
        match self {
            Self::ApproachingParkingSpot(stage) => stage.kind(),
            Self::Parking(stage) => stage.kind(),
        }
    }

    fn next_stage(&self) -> Option<StageKind> {
        match self {
            Self::ApproachingParkingSpot(stage) => stage.next_stage(),
            Self::Parking(stage) => stage.next_stage(),
        }
    }

    fn process(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
        context: &mut ValetParkingContext,
        env: &mut PlanningEnv<'_>,
    ) -> StageStatus {
        match self {
            Self::ApproachingParkingSpot(stage) => stage.process(init_point, frame, context, env),
            Self::Parking(stage) => stage.process(init_point, frame, context, env),
        }
    }
}

pub type ValetParkingScenario<F> = Scenario<ValetParkingStage, F>;

/// Creates a valet parking scenario starting from [`StageKind::ApproachingParkingSpot`].
pub fn scenario(
    config: ValetParkingConfig,
) -> ValetParkingScenario<impl FnMut(StageKind) -> Option<ValetParkingStage>> {
    Scenario::new(
        ValetParkingStage::create(StageKind::ApproachingParkingSpot, &config),
        ValetParkingContext::new(),
        move |kind| Some(ValetParkingStage::create(kind, &config)),
    )
}

/// Whether the vehicle is close enough to the parking spot to start valet parking.
pub fn is_transferable(
    config: &ValetParkingConfig,
    reference_line_info: &ReferenceLineInfo,
    parking_spot_s: Length,
) -> bool {
    let distance = parking_spot_s - reference_line_info.occupied_longitudinal_end();
    distance <= config.parking_spot_range_to_start
}
