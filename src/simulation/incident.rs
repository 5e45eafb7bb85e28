//! Incident records

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{IncidentId, IncidentType, Position, Severity, VehicleId};
use super::vehicle::Vehicle;

/// An event raised against a vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    /// Weak reference; the vehicle may not resolve
    pub vehicle_id: VehicleId,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Copy of the vehicle position when the incident was raised
    pub position: Position,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub resolved: bool,
}

impl Incident {
    /// Raise an incident for `vehicle`, snapshotting its current position
    pub fn for_vehicle(
        id: IncidentId,
        vehicle: &Vehicle,
        incident_type: IncidentType,
        severity: Severity,
        timestamp: DateTime<Utc>,
        resolved: bool,
    ) -> Self {
        Self {
            id,
            vehicle_id: vehicle.id,
            incident_type,
            position: vehicle.position,
            severity,
            timestamp,
            description: incident_type.description().to_string(),
            resolved,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.resolved
    }

    /// Mark the incident resolved. There is no way back.
    pub fn resolve(&mut self) {
        self.resolved = true;
    }
}
