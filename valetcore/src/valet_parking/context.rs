use uom::si::f32::Length;

use crate::routing::ParkingSpotId;

/// State shared by the stages of one valet parking scenario.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValetParkingContext {
    pub(crate) target_parking_spot_id: ParkingSpotId,
    pub(crate) pre_stop_fence_s: Length,
    pub(crate) pre_stop_finished: bool,
}

impl ValetParkingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty while the target spot is unresolved.
    pub fn target_parking_spot_id(&self) -> &ParkingSpotId {
        &self.target_parking_spot_id
    }

    pub fn pre_stop_fence_s(&self) -> Length {
        self.pre_stop_fence_s
    }

    pub fn pre_stop_finished(&self) -> bool {
        self.pre_stop_finished
    }
}

