use thiserror::Error;
use uom::si::{length::meter, velocity::meter_per_second};

use super::ValetParkingContext;
use crate::{
    config::ValetParkingConfig,
    frame::{Frame, ReferenceLineInfo, TrajectoryPoint},
    planner::PlanningError,
    stage::{PlanningEnv, Stage, StageKind, StageStatus},
    vehicle_state::VehicleStateProvider,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
enum ApproachError {
    #[error("no parking space id from routing")]
    NoParkingSpaceId,
    #[error("target parking spot id is empty")]
    EmptyParkingSpotId,
    #[error("pre-stop planning error: {0}")]
    Planning(#[from] PlanningError),
}

/// Drives the vehicle to a stop in front of the target parking spot.
#[derive(Clone, Debug)]
pub struct ApproachingParkingSpot {
    config: ValetParkingConfig,
    next_stage: Option<StageKind>,
}

impl ApproachingParkingSpot {
    pub fn new(config: ValetParkingConfig) -> Self {
        Self {
            config,
            next_stage: None,
        }
    }

    /// Returns `true` and marks the pre-stop as finished in `context` if the vehicle
    /// has stopped close enough to the pre-stop fence.
    ///
    /// Only the distance before the fence is bounded: a vehicle whose front edge
    /// has passed the fence still qualifies.
    pub fn check_adc_stop<V>(
        &self,
        reference_line_info: &ReferenceLineInfo,
        context: &mut ValetParkingContext,
        vehicle_state: &V,
    ) -> bool
    where
        V: VehicleStateProvider + ?Sized,
    {
        let adc_speed = vehicle_state.linear_velocity();
        if adc_speed > self.config.max_adc_stop_speed {
            log::debug!(
                "ADC not stopped: speed[{}]",
                adc_speed.get::<meter_per_second>()
            );
            return false;
        }

        let adc_front_edge_s = reference_line_info.occupied_longitudinal_end();
        let distance_stop_line_to_adc_front_edge = context.pre_stop_fence_s - adc_front_edge_s;
        if distance_stop_line_to_adc_front_edge > self.config.max_valid_stop_distance {
            log::debug!(
                "not a valid stop: {}m before the pre-stop fence",
                distance_stop_line_to_adc_front_edge.get::<meter>()
            );
            return false;
        }

        context.pre_stop_finished = true;
        true
    }

    fn try_process(
        &self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
        context: &mut ValetParkingContext,
        env: &mut PlanningEnv<'_>,
    ) -> Result<bool, ApproachError> {
        context.target_parking_spot_id.clear();
        context.target_parking_spot_id = frame
            .routing()
            .parking_spot_id()
            .cloned()
            .ok_or(ApproachError::NoParkingSpaceId)?;

        if context.target_parking_spot_id.is_empty() {
            return Err(ApproachError::EmptyParkingSpotId);
        }

        let open_space_info = frame.open_space_info_mut();
        open_space_info.set_pre_stop_finished(context.pre_stop_finished);
        open_space_info.set_target_parking_spot_id(context.target_parking_spot_id.clone());

        env.planner.plan_on_reference_line(init_point, frame)?;
        context.pre_stop_fence_s = frame
            .open_space_info()
            .pre_stop_fence_s()
            .ok_or(PlanningError::MissingStopFence)?;

        let reference_line_info = frame
            .reference_line_info()
            .first()
            .ok_or(PlanningError::NoReferenceLine)?;
        Ok(self.check_adc_stop(reference_line_info, context, env.vehicle_state))
    }
}

impl Stage for ApproachingParkingSpot {
    type Context = ValetParkingContext;

    fn kind(&self) -> StageKind {
        StageKind::ApproachingParkingSpot
    }

    fn next_stage(&self) -> Option<StageKind> {
        self.next_stage
    }

    fn process(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
        context: &mut ValetParkingContext,
        env: &mut PlanningEnv<'_>,
    ) -> StageStatus {
        log::debug!("stage: {}", self.kind());
        match self.try_process(init_point, frame, context, env) {
            Ok(true) => {
                self.next_stage = Some(StageKind::Parking);
                StageStatus::Finished
            }
            Ok(false) => StageStatus::Running,
            Err(err) => {
                log::error!("{}", err);
                StageStatus::Error
            }
        }
    }
}
