use heapless::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::f32::{Acceleration, Length, Time, Velocity};

use crate::{
    routing::{ParkingSpotId, RoutingRequest},
    MAX_REFERENCE_LINES, MAX_TRAJECTORY_POINTS,
};

pub type Trajectory = Vec<TrajectoryPoint, MAX_TRAJECTORY_POINTS>;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub s: Length,
    pub x: Length,
    pub v: Velocity,
    pub a: Acceleration,
    pub relative_time: Time,
}

/// Region occupied by the vehicle in reference line coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SlBoundary {
    pub start_s: Length,
    pub end_s: Length,
    pub start_l: Length,
    pub end_l: Length,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceLineInfo {
    adc_sl_boundary: SlBoundary,
    trajectory: Trajectory,
}

impl ReferenceLineInfo {
    pub fn new(adc_sl_boundary: SlBoundary) -> Self {
        Self {
            adc_sl_boundary,
            trajectory: Trajectory::new(),
        }
    }

    /// Front edge of the vehicle along this reference line.
    pub fn occupied_longitudinal_end(&self) -> Length {
        self.adc_sl_boundary.end_s
    }

    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        &self.trajectory
    }

    pub fn set_trajectory(&mut self, trajectory: Trajectory) {
        self.trajectory = trajectory;
    }
}

/// Shared state of open space planning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenSpaceInfo {
    target_parking_spot_id: ParkingSpotId,
    pre_stop_finished: bool,
    pre_stop_fence_s: Option<Length>,
    is_on_open_space_trajectory: bool,
}

impl OpenSpaceInfo {
    pub fn target_parking_spot_id(&self) -> &ParkingSpotId {
        &self.target_parking_spot_id
    }

    pub fn set_target_parking_spot_id(&mut self, id: ParkingSpotId) {
        self.target_parking_spot_id = id;
    }

    pub fn pre_stop_finished(&self) -> bool {
        self.pre_stop_finished
    }

    pub fn set_pre_stop_finished(&mut self, finished: bool) {
        self.pre_stop_finished = finished;
    }

    pub fn pre_stop_fence_s(&self) -> Option<Length> {
        self.pre_stop_fence_s
    }

    pub fn set_pre_stop_fence_s(&mut self, s: Length) {
        self.pre_stop_fence_s = Some(s);
    }

    pub fn is_on_open_space_trajectory(&self) -> bool {
        self.is_on_open_space_trajectory
    }

    pub fn set_is_on_open_space_trajectory(&mut self, on: bool) {
        self.is_on_open_space_trajectory = on;
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("reference line capacity ({capacity}) exceeded")]
    TooManyReferenceLines { capacity: usize },
}

/// Snapshot of the world for a single planning cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    sequence_num: u32,
    routing: RoutingRequest,
    open_space_info: OpenSpaceInfo,
    reference_line_info: Vec<ReferenceLineInfo, MAX_REFERENCE_LINES>,
}

impl Frame {
    pub fn new(sequence_num: u32, routing: RoutingRequest) -> Self {
        Self {
            sequence_num,
            routing,
            ..Default::default()
        }
    }

    pub fn sequence_num(&self) -> u32 {
        self.sequence_num
    }

    pub fn routing(&self) -> &RoutingRequest {
        &self.routing
    }

    pub fn open_space_info(&self) -> &OpenSpaceInfo {
        &self.open_space_info
    }

    pub fn open_space_info_mut(&mut self) -> &mut OpenSpaceInfo {
        &mut self.open_space_info
    }

    pub fn reference_line_info(&self) -> &[ReferenceLineInfo] {
        &self.reference_line_info
    }

    pub fn reference_line_info_mut(&mut self) -> &mut [ReferenceLineInfo] {
        &mut self.reference_line_info
    }

    pub fn push_reference_line_info(&mut self, info: ReferenceLineInfo) -> Result<(), FrameError> {
        self.reference_line_info
            .push(info)
            .map_err(|_| FrameError::TooManyReferenceLines {
                capacity: MAX_REFERENCE_LINES,
            })
    }
}
