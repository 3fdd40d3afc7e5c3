use uom::si::f32::{Acceleration, Length, Time, Velocity};
use uom::si::{
    acceleration::meter_per_second_squared, length::meter, time::second,
    velocity::meter_per_second,
};
use valetcore::{
    config::ValetParkingConfig,
    frame::{Frame, ReferenceLineInfo, SlBoundary, TrajectoryPoint},
    planner::TrajectoryPlanner,
    routing::{ParkingSpace, RoutingRequest},
    scenario::ScenarioStatus,
    stage::{PlanningEnv, Stage, StageKind, StageStatus},
    valet_parking::{self, ApproachingParkingSpot, ValetParkingContext, ValetParkingStage},
    vehicle_state::VehicleState,
};
use valetsim::{Simulator, StopPlanner, Vehicle};

fn config() -> ValetParkingConfig {
    ValetParkingConfig::builder()
        .max_adc_stop_speed(Velocity::new::<meter_per_second>(0.2))
        .max_valid_stop_distance(Length::new::<meter>(1.0))
        .build()
}

fn routing(id: &str) -> RoutingRequest {
    RoutingRequest::with_parking_space(ParkingSpace::with_id(id).unwrap())
}

fn planner(parking_spot_s: f32) -> StopPlanner {
    StopPlanner::builder()
        .parking_spot_s(Length::new::<meter>(parking_spot_s))
        .cruise_velocity(Velocity::new::<meter_per_second>(2.0))
        .deceleration(Acceleration::new::<meter_per_second_squared>(1.0))
        .period(Time::new::<second>(0.1))
        .build()
}

fn frame(routing: RoutingRequest, front_edge_s: f32) -> Frame {
    let mut frame = Frame::new(0, routing);
    frame
        .push_reference_line_info(ReferenceLineInfo::new(SlBoundary {
            start_s: Length::new::<meter>(front_edge_s - 4.9),
            end_s: Length::new::<meter>(front_edge_s),
            start_l: Length::new::<meter>(-1.0),
            end_l: Length::new::<meter>(1.0),
        }))
        .unwrap();
    frame
}

fn process_once(speed: f32, front_edge_s: f32) -> (StageStatus, ValetParkingContext, Frame) {
    let mut stage = ApproachingParkingSpot::new(config());
    let mut context = ValetParkingContext::new();
    let mut planner = planner(100.0);
    let vehicle = VehicleState {
        linear_velocity: Velocity::new::<meter_per_second>(speed),
        ..Default::default()
    };
    let mut frame = frame(routing("spot-42"), front_edge_s);
    let mut env = PlanningEnv::new(&mut planner, &vehicle);
    let status = stage.process(&TrajectoryPoint::default(), &mut frame, &mut context, &mut env);
    (status, context, frame)
}

#[test]
fn test_qualifying_stop() {
    let (status, context, frame) = process_once(0.1, 99.5);

    assert_eq!(status, StageStatus::Finished);
    assert!(context.pre_stop_finished());
    assert_eq!(context.target_parking_spot_id().as_str(), "spot-42");
    assert_eq!(context.pre_stop_fence_s(), Length::new::<meter>(100.0));
    assert_eq!(
        frame.open_space_info().target_parking_spot_id().as_str(),
        "spot-42"
    );
    assert!(!frame.reference_line_info()[0].trajectory().is_empty());
}

#[test]
fn test_too_fast() {
    let (status, context, _) = process_once(0.5, 99.5);

    assert_eq!(status, StageStatus::Running);
    assert!(!context.pre_stop_finished());
    assert_eq!(context.target_parking_spot_id().as_str(), "spot-42");
}

#[test]
fn test_too_far() {
    let (status, context, _) = process_once(0.1, 95.0);

    assert_eq!(status, StageStatus::Running);
    assert!(!context.pre_stop_finished());
}

#[test]
fn test_unresolved_id_twice() {
    let mut stage = ApproachingParkingSpot::new(config());
    let mut context = ValetParkingContext::new();
    let mut planner = planner(100.0);
    let vehicle = VehicleState::default();

    for _ in 0..2 {
        let mut frame = frame(RoutingRequest::default(), 99.5);
        let mut env = PlanningEnv::new(&mut planner, &vehicle);
        let status = stage.process(
            &TrajectoryPoint::default(),
            &mut frame,
            &mut context,
            &mut env,
        );

        assert_eq!(status, StageStatus::Error);
        assert_eq!(context, ValetParkingContext::new());
        assert_eq!(frame.open_space_info().pre_stop_fence_s(), None);
    }
}

#[test]
fn test_planning_failure_aborts_scenario() {
    let mut scenario = valet_parking::scenario(config());
    let mut planner = planner(100.0);
    planner.fail_with("blocked");
    let vehicle = VehicleState::default();
    let mut frame = frame(routing("spot-42"), 99.5);
    let mut env = PlanningEnv::new(&mut planner, &vehicle);

    let status = scenario.process(&TrajectoryPoint::default(), &mut frame, &mut env);

    assert_eq!(status, ScenarioStatus::Done);
    assert_eq!(
        scenario.current_stage().kind(),
        StageKind::ApproachingParkingSpot
    );
    assert!(!scenario.context().pre_stop_finished());
    assert_eq!(
        frame.open_space_info().target_parking_spot_id().as_str(),
        "spot-42"
    );
}

#[test]
fn test_approach_and_park() {
    let vehicle = Vehicle::builder()
        .s(Length::new::<meter>(60.0))
        .period(Time::new::<second>(0.01))
        .time_constant(Time::new::<second>(0.05))
        .max_acceleration(Acceleration::new::<meter_per_second_squared>(2.0))
        .max_deceleration(Acceleration::new::<meter_per_second_squared>(4.0))
        .front_edge_to_center(Length::new::<meter>(3.9))
        .back_edge_to_center(Length::new::<meter>(1.0))
        .width(Length::new::<meter>(2.0))
        .build();
    let mut simulator = Simulator::builder()
        .vehicle(vehicle)
        .routing(routing("spot-42"))
        .steps_per_cycle(10)
        .build();
    let mut planner = planner(100.0);
    let config = ValetParkingConfig::default();
    let parking_spot_s = Length::new::<meter>(100.0);

    // follow the lane until the spot is in range
    let mut cycles = 0;
    loop {
        let mut frame = simulator.frame().unwrap();
        let info = &frame.reference_line_info()[0];
        if valet_parking::is_transferable(&config, info, parking_spot_s) {
            break;
        }
        assert!(cycles < 1000, "the parking spot never came in range");
        cycles += 1;

        let init_point = simulator.vehicle().init_point();
        planner.plan_on_reference_line(&init_point, &mut frame).unwrap();
        simulator.advance(&frame);
    }
    assert!(cycles > 0);
    assert!(simulator.vehicle().state().linear_velocity > Velocity::default());

    let mut scenario = valet_parking::scenario(config);
    let mut cycles = 0;
    while scenario.current_stage().kind() == StageKind::ApproachingParkingSpot {
        assert!(cycles < 1000, "the vehicle did not stop in front of the spot");
        cycles += 1;

        let mut frame = simulator.frame().unwrap();
        let init_point = simulator.vehicle().init_point();
        let vehicle = simulator.vehicle().state();
        let mut env = PlanningEnv::new(&mut planner, &vehicle);
        let status = scenario.process(&init_point, &mut frame, &mut env);
        assert_eq!(status, ScenarioStatus::Processing);

        if scenario.current_stage().kind() == StageKind::Parking {
            let distance = parking_spot_s
                - frame.reference_line_info()[0].occupied_longitudinal_end();
            assert!(distance <= config.max_valid_stop_distance);
            assert!(vehicle.linear_velocity <= config.max_adc_stop_speed);
        } else {
            assert!(!scenario.context().pre_stop_finished());
        }
        simulator.advance(&frame);
    }
    // the vehicle enters the scenario while still moving
    assert!(cycles > 1);
    assert!(scenario.context().pre_stop_finished());
    assert_eq!(scenario.context().target_parking_spot_id().as_str(), "spot-42");

    let mut frame = simulator.frame().unwrap();
    let init_point = simulator.vehicle().init_point();
    let vehicle = simulator.vehicle().state();
    let mut env = PlanningEnv::new(&mut planner, &vehicle);
    let status = scenario.process(&init_point, &mut frame, &mut env);

    assert_eq!(status, ScenarioStatus::Processing);
    assert!(frame.open_space_info().is_on_open_space_trajectory());
    assert_eq!(planner.open_space_cycles(), 1);

    scenario.reset(ValetParkingStage::create(
        StageKind::ApproachingParkingSpot,
        &config,
    ));
    assert_eq!(scenario.status(), ScenarioStatus::Unknown);
    assert_eq!(*scenario.context(), ValetParkingContext::new());
    assert_eq!(
        scenario.current_stage().kind(),
        StageKind::ApproachingParkingSpot
    );
}
