//! Initial population generators
//!
//! Seeds a fresh fleet around the configured anchor areas and an incident
//! history tied to a random subset of that fleet.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::f64::consts::TAU;

use super::incident::Incident;
use super::params::{SimParams, MAX_INITIAL_SPEED};
use super::types::{
    IncidentId, IncidentType, Severity, VehicleId, VehicleStatus, VehicleType, FULL_TURN_DEG,
};
use super::vehicle::Vehicle;

/// Pick one value uniformly from a non-empty fixed table
fn pick<T: Copy, R: Rng + ?Sized>(table: &[T], rng: &mut R) -> T {
    table[rng.random_range(0..table.len())]
}

/// Generate `count` vehicles with ids `v-1..v-count`
///
/// Each vehicle is placed uniformly (by angle and distance) inside a randomly
/// chosen anchor area. Type, status, speed and heading are independent draws.
pub fn generate_vehicles<R: Rng + ?Sized>(
    count: usize,
    params: &SimParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Vehicle> {
    let mut vehicles = Vec::with_capacity(count);

    for index in 0..count {
        let Some(area) = params.anchors.choose(rng) else {
            warn!("No anchor areas configured, cannot place vehicles");
            return Vec::new();
        };

        let angle = rng.random::<f64>() * TAU;
        let distance = rng.random::<f64>() * area.radius;
        let position = area.center.offset(angle, distance);

        let number = index + 1;
        vehicles.push(Vehicle::new(
            VehicleId(number),
            format!("Vehicle {}", number),
            pick(&VehicleType::ALL, rng),
            pick(&VehicleStatus::ALL, rng),
            position,
            f64::from(rng.random_range(0..MAX_INITIAL_SPEED)),
            f64::from(rng.random_range(0..FULL_TURN_DEG as u32)),
            now,
        ));
    }

    debug!("Generated {} vehicles", vehicles.len());
    vehicles
}

/// Build an incident of random type and severity against `vehicle`
pub(crate) fn random_incident<R: Rng + ?Sized>(
    id: IncidentId,
    vehicle: &Vehicle,
    rng: &mut R,
    now: DateTime<Utc>,
    resolved: bool,
) -> Incident {
    let incident_type = pick(&IncidentType::ALL, rng);
    let severity = pick(&Severity::ALL, rng);
    Incident::for_vehicle(id, vehicle, incident_type, severity, now, resolved)
}

/// Generate the initial incident history
///
/// Returns `min(count, vehicles.len())` incidents with ids `i-1..`, each on a
/// distinct vehicle. Some are already resolved, per
/// `params.preresolved_probability`.
pub fn generate_incidents<R: Rng + ?Sized>(
    vehicles: &[Vehicle],
    count: usize,
    params: &SimParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Incident> {
    let mut chosen: Vec<&Vehicle> = vehicles.iter().collect();
    chosen.shuffle(rng);
    chosen.truncate(count);

    let incidents: Vec<Incident> = chosen
        .into_iter()
        .enumerate()
        .map(|(index, vehicle)| {
            let id = IncidentId(index as u64 + 1);
            let resolved = rng.random_bool(params.preresolved_probability);
            random_incident(id, vehicle, rng, now, resolved)
        })
        .collect();

    debug!("Generated {} initial incidents", incidents.len());
    incidents
}
