//! Core types for the fleet simulation
//!
//! Identifiers, positions and the small enumerations shared by vehicles and
//! incidents. Everything here is plain data with no simulation behavior.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Identifier of a vehicle, rendered as `v-{n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v-{}", self.0)
    }
}

impl Serialize for VehicleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identifier of an incident, rendered as `i-{n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i-{}", self.0)
    }
}

impl Serialize for IncidentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A geographic coordinate in degrees
///
/// No validity constraint is enforced; simulated vehicles may drift anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Offset this position by `distance` degrees along `angle` radians
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position {
            lat: self.lat + distance * angle.sin(),
            lng: self.lng + distance * angle.cos(),
        }
    }
}

/// Type of vehicle in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Truck,
    Bus,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Car, VehicleType::Truck, VehicleType::Bus];
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::Car => "car",
            VehicleType::Truck => "truck",
            VehicleType::Bus => "bus",
        };
        f.pad(name)
    }
}

/// Operational status of a vehicle. Only `Active` vehicles move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Idle,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Active,
        VehicleStatus::Idle,
        VehicleStatus::Maintenance,
    ];
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Idle => "idle",
            VehicleStatus::Maintenance => "maintenance",
        };
        f.pad(name)
    }
}

/// Kind of incident raised against a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    Accident,
    Speeding,
    Maintenance,
    Alert,
}

impl IncidentType {
    pub const ALL: [IncidentType; 4] = [
        IncidentType::Accident,
        IncidentType::Speeding,
        IncidentType::Maintenance,
        IncidentType::Alert,
    ];

    /// Fixed human-readable description for this incident type
    pub fn description(&self) -> &'static str {
        match self {
            IncidentType::Accident => "Vehicle collision detected",
            IncidentType::Speeding => "Vehicle exceeding speed limit",
            IncidentType::Maintenance => "Vehicle requires maintenance",
            IncidentType::Alert => "Unusual vehicle behavior detected",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncidentType::Accident => "accident",
            IncidentType::Speeding => "speeding",
            IncidentType::Maintenance => "maintenance",
            IncidentType::Alert => "alert",
        };
        f.pad(name)
    }
}

/// Severity of an incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Sort rank for triage lists, most urgent first
    pub fn priority_rank(&self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.pad(name)
    }
}

/// Full turn in degrees
pub const FULL_TURN_DEG: f64 = 360.0;

/// Normalize a heading in degrees into [0, 360)
///
/// Works for any finite input, however many turns away from the range it is.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_heading_wraps_both_directions() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(370.0), 10.0);
        assert_eq!(normalize_heading(-10.0), 350.0);
        assert_eq!(normalize_heading(-730.0), 350.0);
        assert_eq!(normalize_heading(1085.0), 5.0);
    }

    #[test]
    fn normalize_heading_never_returns_full_turn() {
        let h = normalize_heading(-1e-15);
        assert!((0.0..FULL_TURN_DEG).contains(&h), "got {}", h);
    }

    #[test]
    fn ids_render_with_prefix() {
        assert_eq!(VehicleId(3).to_string(), "v-3");
        assert_eq!(IncidentId(12).to_string(), "i-12");
    }

    #[test]
    fn severity_rank_puts_high_first() {
        assert!(Severity::High.priority_rank() < Severity::Medium.priority_rank());
        assert!(Severity::Medium.priority_rank() < Severity::Low.priority_rank());
    }
}
