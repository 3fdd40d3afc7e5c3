use serde::{Deserialize, Serialize};
use uom::si::f32::{Length, Velocity};

/// Read-only access to the ego vehicle's kinematic state.
///
/// The provider is expected to reflect the current planning cycle.
pub trait VehicleStateProvider {
    fn linear_velocity(&self) -> Velocity;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct VehicleState {
    pub s: Length,
    pub linear_velocity: Velocity,
}

impl VehicleStateProvider for VehicleState {
    fn linear_velocity(&self) -> Velocity {
        self.linear_velocity
    }
}
