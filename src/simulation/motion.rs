//! Vehicle motion for the fleet simulation
//!
//! Each tick nudges active vehicles along their heading. The displacement is
//! `speed * speed_factor` coordinate degrees, which is a visual scalar and not
//! a calibrated distance.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::params::SimParams;
use super::types::{normalize_heading, Position};
use super::vehicle::Vehicle;

/// Advance a single active vehicle by one tick, returning the new record
pub fn advance_vehicle<R: Rng + ?Sized>(
    vehicle: &Vehicle,
    params: &SimParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vehicle {
    let heading_rad = vehicle.heading.to_radians();
    let step = vehicle.speed * params.speed_factor;
    let position = Position {
        lat: vehicle.position.lat + heading_rad.sin() * step,
        lng: vehicle.position.lng + heading_rad.cos() * step,
    };

    let mut heading = vehicle.heading;
    if rng.random_bool(params.heading_change_probability) {
        let jitter = params.heading_jitter_deg;
        let delta = (rng.random::<f64>() * 2.0 - 1.0) * jitter;
        heading = normalize_heading(heading + delta);
    }

    Vehicle {
        position,
        heading,
        last_updated: now,
        ..vehicle.clone()
    }
}

/// Advance every active vehicle by one tick
///
/// The input is left untouched. Vehicles that are idle or in maintenance are
/// passed through as exact copies, `last_updated` included.
pub fn advance_positions<R: Rng + ?Sized>(
    vehicles: &[Vehicle],
    params: &SimParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Vehicle> {
    vehicles
        .iter()
        .map(|vehicle| {
            if vehicle.is_active() {
                advance_vehicle(vehicle, params, rng, now)
            } else {
                vehicle.clone()
            }
        })
        .collect()
}
