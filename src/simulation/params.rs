//! Tunable simulation parameters
//!
//! The probabilities and scalars here are not calibrated against anything
//! physical; they only shape how lively the simulated fleet looks. All
//! fields are optional when loaded from JSON and fall back to defaults.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::types::Position;

/// A named geographic center and radius used to seed vehicle positions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnchorArea {
    pub name: String,
    pub center: Position,
    /// Radius in degrees
    pub radius: f64,
}

impl AnchorArea {
    pub fn new(name: &str, lat: f64, lng: f64, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            center: Position::new(lat, lng),
            radius,
        }
    }
}

/// Default anchor radius in degrees
pub const DEFAULT_ANCHOR_RADIUS: f64 = 0.1;

/// Upper bound (exclusive) for generated vehicle speeds in km/h
pub const MAX_INITIAL_SPEED: u32 = 80;

/// Seconds between motion ticks
pub const DEFAULT_MOTION_INTERVAL_SECS: f64 = 2.0;

/// Seconds between incident emission ticks
pub const DEFAULT_INCIDENT_INTERVAL_SECS: f64 = 15.0;

fn default_anchors() -> Vec<AnchorArea> {
    vec![
        AnchorArea::new("New York", 40.7128, -74.0060, DEFAULT_ANCHOR_RADIUS),
        AnchorArea::new("Los Angeles", 34.0522, -118.2437, DEFAULT_ANCHOR_RADIUS),
        AnchorArea::new("Chicago", 41.8781, -87.6298, DEFAULT_ANCHOR_RADIUS),
    ]
}

/// Parameters for generation, motion and incident emission
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Areas vehicles are spawned around
    pub anchors: Vec<AnchorArea>,
    /// Number of vehicles created when the fleet is seeded
    pub vehicle_count: usize,
    /// Number of incidents in the initial history
    pub initial_incident_count: usize,
    /// Coordinate degrees moved per tick for each km/h of speed
    pub speed_factor: f64,
    /// Chance per tick that an active vehicle turns
    pub heading_change_probability: f64,
    /// Maximum heading change in degrees, either direction
    pub heading_jitter_deg: f64,
    /// Chance that an incident in the initial history is already resolved
    pub preresolved_probability: f64,
    /// Chance per emission tick that a new incident is raised
    pub incident_probability: f64,
    /// Seconds between motion ticks
    pub motion_interval_secs: f64,
    /// Seconds between incident emission ticks
    pub incident_interval_secs: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
            vehicle_count: 12,
            initial_incident_count: 5,
            speed_factor: 0.00001,
            heading_change_probability: 0.2,
            heading_jitter_deg: 15.0,
            preresolved_probability: 0.3,
            incident_probability: 0.05,
            motion_interval_secs: DEFAULT_MOTION_INTERVAL_SECS,
            incident_interval_secs: DEFAULT_INCIDENT_INTERVAL_SECS,
        }
    }
}

impl SimParams {
    /// Load parameters from a JSON file and validate them
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse parameters from a JSON document and validate them
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let params: SimParams = serde_json::from_str(raw).context("Malformed simulation config")?;
        params.validate()?;
        Ok(params)
    }

    /// Check that every parameter is usable by the generators and timers
    pub fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() {
            bail!("At least one anchor area is required");
        }
        for anchor in &self.anchors {
            if !(anchor.radius > 0.0) {
                bail!("Anchor area '{}' must have a positive radius", anchor.name);
            }
        }

        let probabilities = [
            ("heading_change_probability", self.heading_change_probability),
            ("preresolved_probability", self.preresolved_probability),
            ("incident_probability", self.incident_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be within [0, 1], got {}", name, value);
            }
        }

        if !(self.speed_factor >= 0.0) {
            bail!("speed_factor must be non-negative");
        }
        if !(self.heading_jitter_deg >= 0.0) {
            bail!("heading_jitter_deg must be non-negative");
        }
        interval_from_secs("motion_interval_secs", self.motion_interval_secs)?;
        interval_from_secs("incident_interval_secs", self.incident_interval_secs)?;
        Ok(())
    }

    /// Motion cadence; only meaningful once `validate` has passed
    pub fn motion_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.motion_interval_secs).unwrap_or(Duration::MAX)
    }

    /// Incident cadence; only meaningful once `validate` has passed
    pub fn incident_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.incident_interval_secs).unwrap_or(Duration::MAX)
    }
}

/// Convert a tick interval in seconds, rejecting values that round to zero
/// or do not fit in a `Duration`
fn interval_from_secs(name: &str, secs: f64) -> Result<Duration> {
    let interval = Duration::try_from_secs_f64(secs)
        .with_context(|| format!("{} must be a positive number of seconds, got {}", name, secs))?;
    if interval.is_zero() {
        bail!("{} is too small to schedule, got {}", name, secs);
    }
    Ok(interval)
}
