//! Vehicle records
//!
//! A vehicle is plain data. Movement lives in the motion module so that the
//! simulator can build new records instead of mutating shared ones.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{Position, VehicleId, VehicleStatus, VehicleType};

/// A tracked vehicle in the fleet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub position: Position,
    /// Speed in km/h, never negative
    pub speed: f64,
    /// Heading in degrees within [0, 360)
    pub heading: f64,
    pub last_updated: DateTime<Utc>,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VehicleId,
        name: String,
        vehicle_type: VehicleType,
        status: VehicleStatus,
        position: Position,
        speed: f64,
        heading: f64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            vehicle_type,
            status,
            position,
            speed,
            heading,
            last_updated,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == VehicleStatus::Active
    }
}
