//! Standalone fleet simulation module
//!
//! This module contains the vehicle and incident simulation logic. It has no
//! timers of its own and can be driven tick by tick from tests or the
//! console, or in real time by the dashboard.

mod emitter;
mod generator;
mod incident;
mod motion;
mod notification;
mod params;
mod types;
mod vehicle;
mod views;
mod world;

pub use emitter::IncidentEmitter;
pub use generator::{generate_incidents, generate_vehicles};
pub use incident::Incident;
pub use motion::{advance_positions, advance_vehicle};
pub use notification::{Notification, NotificationVariant, UNKNOWN_VEHICLE_LABEL};
pub use params::{
    AnchorArea, SimParams, DEFAULT_ANCHOR_RADIUS, DEFAULT_INCIDENT_INTERVAL_SECS,
    DEFAULT_MOTION_INTERVAL_SECS, MAX_INITIAL_SPEED,
};
pub use types::{
    normalize_heading, IncidentId, IncidentType, Position, Severity, VehicleId, VehicleStatus,
    VehicleType, FULL_TURN_DEG,
};
pub use vehicle::Vehicle;
pub use views::{
    incident_history, open_incidents_by_priority, public_transit, vehicle_list_order,
    AdminOverview,
};
pub use world::{FleetSnapshot, FleetWorld};
