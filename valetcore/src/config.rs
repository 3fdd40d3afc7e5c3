use core::marker::PhantomData;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;
use uom::si::f32::{Length, Velocity};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{name}` must be a non-negative number")]
    InvalidThreshold { name: &'static str },
}

/// Thresholds of the valet parking scenario.
#[derive(Clone, Copy, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
pub struct ValetParkingConfig {
    /// The vehicle counts as stopped at or below this speed.
    #[builder(default = Velocity { value: 0.3, dimension: PhantomData, units: PhantomData })]
    pub max_adc_stop_speed: Velocity,
    /// Maximum gap between the front edge of the vehicle and the pre-stop fence.
    #[builder(default = Length { value: 1.0, dimension: PhantomData, units: PhantomData })]
    pub max_valid_stop_distance: Length,
    #[builder(default = Length { value: 20.0, dimension: PhantomData, units: PhantomData })]
    pub parking_spot_range_to_start: Length,
}

impl Default for ValetParkingConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ValetParkingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |value: f32, name| {
            if value.is_nan() || value.is_sign_negative() {
                Err(ConfigError::InvalidThreshold { name })
            } else {
                Ok(())
            }
        };
        check(self.max_adc_stop_speed.value, "max_adc_stop_speed")?;
        check(self.max_valid_stop_distance.value, "max_valid_stop_distance")?;
        check(
            self.parking_spot_range_to_start.value,
            "parking_spot_range_to_start",
        )
    }
}
