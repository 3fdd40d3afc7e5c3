#![cfg_attr(not(test), no_std)]

#[allow(unused_imports)]
use micromath::F32Ext;
use typed_builder::TypedBuilder;
use uom::si::{
    acceleration::meter_per_second_squared,
    f32::{Acceleration, Length, Time, Velocity},
    ratio::ratio,
    velocity::meter_per_second,
};
use valetcore::{
    frame::{Frame, FrameError, ReferenceLineInfo, SlBoundary, Trajectory, TrajectoryPoint},
    planner::{PlanningError, TrajectoryPlanner},
    routing::RoutingRequest,
    vehicle_state::{VehicleState, VehicleStateProvider},
};

/// A vehicle moving forward along the reference line.
///
/// The actual acceleration follows the command with a first order lag.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Vehicle {
    #[builder(default)]
    s: Length,
    #[builder(default)]
    v: Velocity,
    #[builder(default, setter(skip))]
    a: Acceleration,
    #[builder(default, setter(skip))]
    command: Acceleration,
    period: Time,
    time_constant: Time,
    max_acceleration: Acceleration,
    max_deceleration: Acceleration,
    front_edge_to_center: Length,
    back_edge_to_center: Length,
    width: Length,
}

impl Vehicle {
    pub fn step(&mut self) {
        let alpha = (self.time_constant / (self.time_constant + self.period)).get::<ratio>();
        self.a = self.a * alpha + self.command * (1.0 - alpha);

        let next_v = self.v + self.a * self.period;
        let next_v = if next_v.value < 0.0 {
            Default::default()
        } else {
            next_v
        };
        self.s += (self.v + next_v) * self.period / 2.0;
        self.v = next_v;
    }

    pub fn apply(&mut self, acceleration: Acceleration) {
        self.command = if acceleration > self.max_acceleration {
            self.max_acceleration
        } else if acceleration < -self.max_deceleration {
            -self.max_deceleration
        } else {
            acceleration
        };
    }

    pub fn state(&self) -> VehicleState {
        VehicleState {
            s: self.s,
            linear_velocity: self.v,
        }
    }

    pub fn sl_boundary(&self) -> SlBoundary {
        SlBoundary {
            start_s: self.s - self.back_edge_to_center,
            end_s: self.s + self.front_edge_to_center,
            start_l: -self.width / 2.0,
            end_l: self.width / 2.0,
        }
    }

    pub fn init_point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            s: self.s,
            x: self.s,
            v: self.v,
            a: self.a,
            ..Default::default()
        }
    }
}

impl VehicleStateProvider for Vehicle {
    fn linear_velocity(&self) -> Velocity {
        self.v
    }
}

/// Plans a stop in front of a parking spot along a straight reference line.
#[derive(Clone, Debug, TypedBuilder)]
pub struct StopPlanner {
    parking_spot_s: Length,
    #[builder(default)]
    stop_offset: Length,
    cruise_velocity: Velocity,
    deceleration: Acceleration,
    period: Time,
    #[builder(default = 20)]
    num_points: usize,
    #[builder(default, setter(skip))]
    failure: Option<&'static str>,
    #[builder(default, setter(skip))]
    open_space_cycles: usize,
}

impl StopPlanner {
    pub fn fence_s(&self) -> Length {
        self.parking_spot_s - self.stop_offset
    }

    /// Makes every following call fail with `reason`.
    pub fn fail_with(&mut self, reason: &'static str) {
        self.failure = Some(reason);
    }

    pub fn open_space_cycles(&self) -> usize {
        self.open_space_cycles
    }

    // v = sqrt(2 * a * d), capped by the cruise velocity.
    fn target_velocity(&self, distance: Length) -> Velocity {
        if distance.value <= 0.0 {
            return Default::default();
        }
        let v = Velocity::new::<meter_per_second>(
            (2.0 * self.deceleration.get::<meter_per_second_squared>() * distance.value).sqrt(),
        );
        if v > self.cruise_velocity {
            self.cruise_velocity
        } else {
            v
        }
    }

    fn stop_trajectory(&self, init_point: &TrajectoryPoint, front_edge_s: Length) -> Trajectory {
        let fence_s = self.fence_s();
        let mut trajectory = Trajectory::new();
        let mut point = *init_point;
        point.relative_time = Default::default();
        for _ in 0..self.num_points {
            if trajectory.push(point).is_err() {
                break;
            }
            let distance = fence_s - front_edge_s - (point.s - init_point.s);
            let v = self.target_velocity(distance);
            let ds = v * self.period;
            point.a = (v - point.v) / self.period;
            point.v = v;
            point.s += if v.value > 0.0 && ds > distance {
                distance
            } else {
                ds
            };
            point.x = point.s;
            point.relative_time += self.period;
        }
        trajectory
    }
}

impl TrajectoryPlanner for StopPlanner {
    fn plan_on_reference_line(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
    ) -> Result<(), PlanningError> {
        if let Some(reason) = self.failure {
            return Err(PlanningError::Failed { reason });
        }
        let front_edge_s = frame
            .reference_line_info()
            .first()
            .ok_or(PlanningError::NoReferenceLine)?
            .occupied_longitudinal_end();
        let trajectory = self.stop_trajectory(init_point, front_edge_s);
        let fence_s = self.fence_s();

        frame.open_space_info_mut().set_pre_stop_fence_s(fence_s);
        for info in frame.reference_line_info_mut() {
            info.set_trajectory(trajectory.clone());
        }
        Ok(())
    }

    fn plan_on_open_space(&mut self, _frame: &mut Frame) -> Result<(), PlanningError> {
        if let Some(reason) = self.failure {
            return Err(PlanningError::Failed { reason });
        }
        self.open_space_cycles += 1;
        Ok(())
    }
}

/// Feeds a [`Vehicle`] with the trajectories planned for it.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Simulator {
    vehicle: Vehicle,
    routing: RoutingRequest,
    steps_per_cycle: usize,
    #[builder(default, setter(skip))]
    sequence_num: u32,
}

impl Simulator {
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Snapshot of the world for the next planning cycle.
    pub fn frame(&mut self) -> Result<Frame, FrameError> {
        let mut frame = Frame::new(self.sequence_num, self.routing.clone());
        frame.push_reference_line_info(ReferenceLineInfo::new(self.vehicle.sl_boundary()))?;
        self.sequence_num += 1;
        Ok(frame)
    }

    /// Tracks the trajectory on the first reference line for one planning cycle.
    ///
    /// The vehicle brakes if no trajectory is available.
    pub fn advance(&mut self, frame: &Frame) {
        let command = frame
            .reference_line_info()
            .first()
            .and_then(|info| info.trajectory().get(1))
            .map(|point| point.a)
            .unwrap_or(-self.vehicle.max_deceleration);
        self.vehicle.apply(command);
        for _ in 0..self.steps_per_cycle {
            self.vehicle.step();
        }
    }
}
