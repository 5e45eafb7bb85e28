//! Incident emission and resolution tests

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use fleet_sim::simulation::{
    generate_vehicles, FleetWorld, IncidentEmitter, IncidentId, NotificationVariant, SimParams,
    Severity, VehicleId, UNKNOWN_VEHICLE_LABEL,
};

fn always_fire() -> SimParams {
    SimParams {
        incident_probability: 1.0,
        ..SimParams::default()
    }
}

/// Test that an empty fleet never produces an incident
#[test]
fn test_emitter_never_fires_on_empty_fleet() {
    let params = always_fire();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut emitter = IncidentEmitter::new();
        assert!(emitter.emit(&[], &params, &mut rng, Utc::now()).is_none());
        assert_eq!(emitter.peek_next_id(), IncidentId(1));
    }
}

/// Test that a zero probability never fires
#[test]
fn test_emitter_respects_zero_probability() {
    let params = SimParams {
        incident_probability: 0.0,
        ..SimParams::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let vehicles = generate_vehicles(10, &params, &mut rng, Utc::now());
    let mut emitter = IncidentEmitter::new();

    for _ in 0..500 {
        assert!(emitter.emit(&vehicles, &params, &mut rng, Utc::now()).is_none());
    }
}

/// Test that an emitted incident references a current vehicle and copies its position
#[test]
fn test_emitted_incident_matches_vehicle() {
    let params = always_fire();
    let mut rng = StdRng::seed_from_u64(2);
    let vehicles = generate_vehicles(6, &params, &mut rng, Utc::now());
    let mut emitter = IncidentEmitter::new();

    for _ in 0..100 {
        let incident = emitter
            .emit(&vehicles, &params, &mut rng, Utc::now())
            .expect("probability 1.0 always fires");
        let vehicle = vehicles
            .iter()
            .find(|v| v.id == incident.vehicle_id)
            .expect("incident vehicle is in the fleet");
        assert_eq!(incident.position, vehicle.position);
        assert!(!incident.resolved);
        assert_eq!(incident.description, incident.incident_type.description());
    }
}

/// Test that emitted ids are unique and continue after the seeded batch
#[test]
fn test_emitted_ids_are_monotonic() {
    let params = always_fire();
    let mut rng = StdRng::seed_from_u64(3);
    let vehicles = generate_vehicles(3, &params, &mut rng, Utc::now());
    let mut emitter = IncidentEmitter::starting_after(5);

    let ids: Vec<IncidentId> = (0..20)
        .filter_map(|_| emitter.emit(&vehicles, &params, &mut rng, Utc::now()))
        .map(|i| i.id)
        .collect();

    assert_eq!(ids.first(), Some(&IncidentId(6)));
    let unique: HashSet<IncidentId> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

/// Test that the default rate fires rarely
#[test]
fn test_default_emission_rate_is_rare() {
    let params = SimParams::default();
    let mut rng = StdRng::seed_from_u64(4);
    let vehicles = generate_vehicles(12, &params, &mut rng, Utc::now());
    let mut emitter = IncidentEmitter::new();

    let fired = (0..2_000)
        .filter(|_| emitter.emit(&vehicles, &params, &mut rng, Utc::now()).is_some())
        .count();
    assert!(fired > 40 && fired < 200, "unexpected firing count {}", fired);
}

/// Test that resolving flips only the target incident
#[test]
fn test_resolve_only_touches_target() {
    let params = SimParams {
        preresolved_probability: 0.0,
        ..SimParams::default()
    };
    let mut world = FleetWorld::new_with_seed(params, 10).unwrap();
    world.seed_fleet();
    let before = world.incidents.clone();
    let target = before[2].id;

    let notification = world.resolve_incident(target).unwrap();
    assert_eq!(notification.title, "Incident resolved");

    for (old, new) in before.iter().zip(world.incidents.iter()) {
        if old.id == target {
            assert!(new.resolved);
            let mut expected = old.clone();
            expected.resolved = true;
            assert_eq!(*new, expected);
        } else {
            assert_eq!(old, new);
        }
    }
}

/// Test that resolving twice is harmless and unknown ids are errors
#[test]
fn test_resolve_idempotent_and_unknown() {
    let mut world = FleetWorld::new_with_seed(SimParams::default(), 11).unwrap();
    world.seed_fleet();
    let target = world.incidents[0].id;

    world.resolve_incident(target).unwrap();
    let after_first = world.incidents.clone();
    world.resolve_incident(target).unwrap();
    assert_eq!(world.incidents, after_first);

    let err = world.resolve_incident(IncidentId(9_999)).unwrap_err();
    assert!(err.to_string().contains("i-9999"));
    assert_eq!(world.incidents, after_first);
}

/// Test that a new incident raises a notification naming the vehicle
#[test]
fn test_incident_tick_notifies_with_vehicle_name() {
    let mut world = FleetWorld::new_with_seed(always_fire(), 12).unwrap();
    world.seed_fleet();
    let seeded = world.incidents.len();

    let notification = world.tick_incidents().expect("probability 1.0 always fires");
    assert_eq!(world.incidents.len(), seeded + 1);

    let incident = world.incidents.last().unwrap();
    assert_eq!(incident.id, IncidentId(seeded as u64 + 1));
    let name = world.vehicle(incident.vehicle_id).unwrap().name.clone();
    assert_eq!(notification.title, format!("New {} detected", incident.incident_type));
    assert_eq!(
        notification.description,
        format!("{} for {}", incident.description, name)
    );
    let expected_variant = if incident.severity == Severity::High {
        NotificationVariant::Destructive
    } else {
        NotificationVariant::Default
    };
    assert_eq!(notification.variant, expected_variant);
}

/// Test that an unknown vehicle renders the fallback label
#[test]
fn test_vehicle_label_fallback() {
    let mut world = FleetWorld::new_with_seed(SimParams::default(), 13).unwrap();
    world.seed_fleet();
    assert_eq!(world.vehicle_label(VehicleId(1)), "Vehicle 1");
    assert_eq!(world.vehicle_label(VehicleId(500)), UNKNOWN_VEHICLE_LABEL);
}
