#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod frame;
pub mod planner;
pub mod routing;
pub mod scenario;
pub mod stage;
pub mod valet_parking;
pub mod vehicle_state;

const MAX_ID_LEN: usize = 64;
const MAX_REFERENCE_LINES: usize = 8;
const MAX_TRAJECTORY_POINTS: usize = 128;
