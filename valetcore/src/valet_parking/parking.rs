use super::ValetParkingContext;
use crate::{
    frame::{Frame, TrajectoryPoint},
    stage::{PlanningEnv, Stage, StageKind, StageStatus},
};

/// Parks the vehicle with open space planning.
///
/// This stage never finishes by itself.
#[derive(Clone, Debug, Default)]
pub struct Parking;

impl Parking {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Parking {
    type Context = ValetParkingContext;

    fn kind(&self) -> StageKind {
        StageKind::Parking
    }

    fn next_stage(&self) -> Option<StageKind> {
        None
    }

    fn process(
        &mut self,
        _init_point: &TrajectoryPoint,
        frame: &mut Frame,
        context: &mut ValetParkingContext,
        env: &mut PlanningEnv<'_>,
    ) -> StageStatus {
        log::debug!("stage: {}", self.kind());
        let open_space_info = frame.open_space_info_mut();
        open_space_info.set_is_on_open_space_trajectory(true);
        open_space_info.set_target_parking_spot_id(context.target_parking_spot_id.clone());

        if let Err(err) = env.planner.plan_on_open_space(frame) {
            log::error!("open space planning error: {}", err);
            return StageStatus::Error;
        }
        StageStatus::Running
    }
}
