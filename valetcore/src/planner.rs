use thiserror::Error;

use crate::frame::{Frame, TrajectoryPoint};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlanningError {
    #[error("planning failed: {reason}")]
    Failed { reason: &'static str },
    #[error("no reference line available")]
    NoReferenceLine,
    #[error("planner did not set a pre-stop fence")]
    MissingStopFence,
}

/// Executes the planning tasks a stage asks for.
pub trait TrajectoryPlanner {
    /// Plans a trajectory anchored to the reference line that brings the vehicle
    /// to a stop before the target parking spot.
    ///
    /// On success, `frame.open_space_info().pre_stop_fence_s()` must be set.
    /// Nothing is guaranteed about `frame` on failure.
    fn plan_on_reference_line(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
    ) -> Result<(), PlanningError>;

    fn plan_on_open_space(&mut self, frame: &mut Frame) -> Result<(), PlanningError>;
}
