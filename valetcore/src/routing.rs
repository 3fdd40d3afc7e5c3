use serde::{Deserialize, Serialize};

use crate::MAX_ID_LEN;

pub type ParkingSpotId = heapless::String<MAX_ID_LEN>;

/// A parking space requested by routing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpace {
    pub id: Option<ParkingSpotId>,
}

impl ParkingSpace {
    /// Returns `None` if `id` does not fit in a [`ParkingSpotId`].
    pub fn with_id(id: &str) -> Option<Self> {
        let mut buf = ParkingSpotId::new();
        buf.push_str(id).ok()?;
        Some(Self { id: Some(buf) })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRequest {
    pub parking_space: Option<ParkingSpace>,
}

impl RoutingRequest {
    pub fn with_parking_space(parking_space: ParkingSpace) -> Self {
        Self {
            parking_space: Some(parking_space),
        }
    }

    // Both the space and its id have to be present.
    pub fn parking_spot_id(&self) -> Option<&ParkingSpotId> {
        self.parking_space.as_ref()?.id.as_ref()
    }
}
