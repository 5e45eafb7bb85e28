//! Motion simulator tests

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fleet_sim::simulation::{
    advance_positions, advance_vehicle, Position, SimParams, Vehicle, VehicleId, VehicleStatus,
    VehicleType,
};

fn vehicle(id: usize, status: VehicleStatus, speed: f64, heading: f64) -> Vehicle {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Vehicle::new(
        VehicleId(id),
        format!("Vehicle {}", id),
        VehicleType::Truck,
        status,
        Position::new(40.7128, -74.0060),
        speed,
        heading,
        created,
    )
}

/// Test that idle and maintenance vehicles pass through unchanged
#[test]
fn test_inactive_vehicles_unchanged() {
    let params = SimParams::default();
    let mut rng = StdRng::seed_from_u64(1);
    let fleet = vec![
        vehicle(1, VehicleStatus::Idle, 50.0, 90.0),
        vehicle(2, VehicleStatus::Maintenance, 70.0, 180.0),
    ];
    let before = fleet.clone();

    let mut current = fleet;
    for _ in 0..50 {
        current = advance_positions(&current, &params, &mut rng, Utc::now());
    }
    assert_eq!(current, before);
}

/// Test that the input collection is not mutated
#[test]
fn test_advance_positions_leaves_input_untouched() {
    let params = SimParams::default();
    let mut rng = StdRng::seed_from_u64(2);
    let fleet = vec![vehicle(1, VehicleStatus::Active, 60.0, 45.0)];
    let before = fleet.clone();

    let updated = advance_positions(&fleet, &params, &mut rng, Utc::now());
    assert_eq!(fleet, before);
    assert_ne!(updated[0].position, before[0].position);
}

/// Test that active vehicles move along their heading
#[test]
fn test_active_vehicle_moves_along_heading() {
    let params = SimParams {
        heading_change_probability: 0.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let start = vehicle(1, VehicleStatus::Active, 50.0, 90.0);
    let now = start.last_updated + ChronoDuration::seconds(2);

    let moved = advance_vehicle(&start, &params, &mut rng, now);
    let step = 50.0 * params.speed_factor;

    // Heading 90 degrees moves latitude only
    assert!((moved.position.lat - (start.position.lat + step)).abs() < 1e-12);
    assert!((moved.position.lng - start.position.lng).abs() < 1e-12);
    assert_eq!(moved.heading, 90.0);
    assert_eq!(moved.last_updated, now);
    assert_eq!(moved.id, start.id);
    assert_eq!(moved.speed, start.speed);
}

/// Test that heading zero moves longitude only
#[test]
fn test_heading_zero_moves_longitude() {
    let params = SimParams {
        heading_change_probability: 0.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(4);
    let start = vehicle(1, VehicleStatus::Active, 40.0, 0.0);

    let moved = advance_vehicle(&start, &params, &mut rng, Utc::now());
    assert!((moved.position.lng - (start.position.lng + 40.0 * params.speed_factor)).abs() < 1e-12);
    assert!((moved.position.lat - start.position.lat).abs() < 1e-12);
}

/// Test that a stationary active vehicle keeps its position while it may turn
#[test]
fn test_zero_speed_vehicle_stays_put() {
    let params = SimParams {
        heading_change_probability: 1.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(5);
    let start = vehicle(1, VehicleStatus::Active, 0.0, 0.0);

    let mut current = vec![start.clone()];
    let mut turned = false;
    for _ in 0..100 {
        current = advance_positions(&current, &params, &mut rng, Utc::now());
        assert_eq!(current[0].position, start.position);
        turned |= current[0].heading != 0.0;
    }
    assert!(turned, "heading should have been perturbed at least once");
}

/// Test that headings stay within [0, 360) under constant perturbation
#[test]
fn test_heading_always_normalized() {
    let params = SimParams {
        heading_change_probability: 1.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(6);
    let mut fleet: Vec<Vehicle> = [0.0, 0.5, 7.0, 180.0, 352.0, 359.9]
        .iter()
        .enumerate()
        .map(|(i, heading)| vehicle(i + 1, VehicleStatus::Active, 30.0, *heading))
        .collect();

    for _ in 0..2_000 {
        fleet = advance_positions(&fleet, &params, &mut rng, Utc::now());
        for v in &fleet {
            assert!(
                (0.0..360.0).contains(&v.heading),
                "heading {} out of range for {}",
                v.heading,
                v.id
            );
        }
    }
}

/// Test that a large jitter still normalizes in one step
#[test]
fn test_large_jitter_normalizes() {
    let params = SimParams {
        heading_change_probability: 1.0,
        heading_jitter_deg: 1_000.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(7);
    let mut current = vehicle(1, VehicleStatus::Active, 10.0, 1.0);

    for _ in 0..1_000 {
        current = advance_vehicle(&current, &params, &mut rng, Utc::now());
        assert!((0.0..360.0).contains(&current.heading), "got {}", current.heading);
    }
}

/// Test that only active vehicles get a new timestamp
#[test]
fn test_last_updated_only_changes_for_active() {
    let params = SimParams::default();
    let mut rng = StdRng::seed_from_u64(8);
    let fleet = vec![
        vehicle(1, VehicleStatus::Active, 20.0, 10.0),
        vehicle(2, VehicleStatus::Idle, 20.0, 10.0),
    ];
    let now = fleet[0].last_updated + ChronoDuration::minutes(5);

    let updated = advance_positions(&fleet, &params, &mut rng, now);
    assert_eq!(updated[0].last_updated, now);
    assert_eq!(updated[1].last_updated, fleet[1].last_updated);
}
