//! Role-scoped read views over the fleet
//!
//! The admin panel, the dispatcher's lists and the public transit tracker all
//! look at the same collections through these helpers. None of them mutate.

use serde::Serialize;
use std::cmp::Ordering;

use super::incident::Incident;
use super::types::{Severity, VehicleId, VehicleStatus, VehicleType};
use super::vehicle::Vehicle;
use super::world::FleetWorld;

/// Fleet-wide counters for the admin panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_vehicles: usize,
    pub active_vehicles: usize,
    pub idle_vehicles: usize,
    pub maintenance_vehicles: usize,
    pub open_incidents: usize,
    pub resolved_incidents: usize,
    /// Open incidents with high severity
    pub critical_incidents: usize,
}

impl AdminOverview {
    pub fn from_collections(vehicles: &[Vehicle], incidents: &[Incident]) -> Self {
        let mut overview = AdminOverview {
            total_vehicles: vehicles.len(),
            ..Default::default()
        };

        for vehicle in vehicles {
            match vehicle.status {
                VehicleStatus::Active => overview.active_vehicles += 1,
                VehicleStatus::Idle => overview.idle_vehicles += 1,
                VehicleStatus::Maintenance => overview.maintenance_vehicles += 1,
            }
        }

        for incident in incidents {
            if incident.resolved {
                overview.resolved_incidents += 1;
            } else {
                overview.open_incidents += 1;
                if incident.severity == Severity::High {
                    overview.critical_incidents += 1;
                }
            }
        }

        overview
    }

    pub fn from_world(world: &FleetWorld) -> Self {
        Self::from_collections(&world.vehicles, &world.incidents)
    }
}

/// Vehicles in list order: active ones first, then by name
pub fn vehicle_list_order(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    let mut sorted: Vec<&Vehicle> = vehicles.iter().collect();
    sorted.sort_by(|a, b| match (a.is_active(), b.is_active()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
    sorted
}

/// Unresolved incidents, most severe first and newest first within a severity
pub fn open_incidents_by_priority(incidents: &[Incident]) -> Vec<&Incident> {
    let mut open: Vec<&Incident> = incidents.iter().filter(|i| i.is_open()).collect();
    open.sort_by(|a, b| {
        a.severity
            .priority_rank()
            .cmp(&b.severity.priority_rank())
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    open
}

/// All incidents for one vehicle, newest first
pub fn incident_history(incidents: &[Incident], vehicle_id: VehicleId) -> Vec<&Incident> {
    let mut history: Vec<&Incident> = incidents
        .iter()
        .filter(|i| i.vehicle_id == vehicle_id)
        .collect();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history
}

/// Vehicles shown to the public: moving trucks and buses
pub fn public_transit(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.is_active() && v.vehicle_type != VehicleType::Car)
        .collect()
}
