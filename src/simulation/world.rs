//! Main fleet world that ties everything together
//!
//! Owns the vehicle and incident collections and applies both simulation
//! ticks and user actions to them. The world has no notion of wall-clock
//! timers; the dashboard drives it in real time and `tick` drives it from a
//! simulated clock.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Duration;

use super::emitter::IncidentEmitter;
use super::generator::{generate_incidents, generate_vehicles};
use super::incident::Incident;
use super::motion::advance_positions;
use super::notification::{Notification, UNKNOWN_VEHICLE_LABEL};
use super::params::SimParams;
use super::types::{IncidentId, VehicleId, VehicleStatus};
use super::vehicle::Vehicle;

/// Serializable view of the world at one instant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    /// Simulated seconds since the fleet was seeded
    pub time: f64,
    pub vehicles: Vec<Vehicle>,
    pub incidents: Vec<Incident>,
}

/// The main fleet world
pub struct FleetWorld {
    /// Simulation parameters, validated on construction
    params: SimParams,

    /// All vehicles, in creation order
    pub vehicles: Vec<Vehicle>,

    /// All incidents, seeded first and then in emission order
    pub incidents: Vec<Incident>,

    /// Vehicle picked in the list or on the map
    selected_vehicle: Option<VehicleId>,

    emitter: IncidentEmitter,

    rng: StdRng,

    /// Simulated time advanced through `tick`
    pub time: Duration,

    motion_elapsed: Duration,
    incident_elapsed: Duration,

    /// Number of motion ticks applied, including manual refreshes
    pub motion_ticks: u64,

    /// Number of incident emission trials run
    pub incident_ticks: u64,
}

impl FleetWorld {
    fn new_internal(params: SimParams, rng: StdRng) -> Result<Self> {
        params.validate().context("Invalid simulation parameters")?;
        Ok(Self {
            params,
            vehicles: Vec::new(),
            incidents: Vec::new(),
            selected_vehicle: None,
            emitter: IncidentEmitter::new(),
            rng,
            time: Duration::ZERO,
            motion_elapsed: Duration::ZERO,
            incident_elapsed: Duration::ZERO,
            motion_ticks: 0,
            incident_ticks: 0,
        })
    }

    /// Create an empty world seeded from OS entropy
    ///
    /// Fails if `params` does not pass `SimParams::validate`.
    pub fn new(params: SimParams) -> Result<Self> {
        Self::new_internal(params, StdRng::from_os_rng())
    }

    /// Create an empty world with a seeded RNG for reproducible simulations
    pub fn new_with_seed(params: SimParams, seed: u64) -> Result<Self> {
        Self::new_internal(params, StdRng::seed_from_u64(seed))
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Generate the initial fleet and incident history
    ///
    /// Replaces whatever the world held before and restarts incident
    /// numbering after the seeded batch.
    pub fn seed_fleet(&mut self) {
        let now = Utc::now();
        self.vehicles = generate_vehicles(self.params.vehicle_count, &self.params, &mut self.rng, now);
        self.incidents = generate_incidents(
            &self.vehicles,
            self.params.initial_incident_count,
            &self.params,
            &mut self.rng,
            now,
        );
        self.emitter = IncidentEmitter::starting_after(self.incidents.len());
        self.selected_vehicle = None;
        info!(
            "Seeded fleet with {} vehicles and {} incidents",
            self.vehicles.len(),
            self.incidents.len()
        );
    }

    /// Replace the vehicle collection with one motion step applied
    pub fn tick_motion(&mut self) {
        self.vehicles = advance_positions(&self.vehicles, &self.params, &mut self.rng, Utc::now());
        self.motion_ticks += 1;
    }

    /// Run one incident emission trial against the current fleet
    ///
    /// Returns the notification for a newly raised incident, if any.
    pub fn tick_incidents(&mut self) -> Option<Notification> {
        self.incident_ticks += 1;
        let incident = self
            .emitter
            .emit(&self.vehicles, &self.params, &mut self.rng, Utc::now())?;

        let notification = Notification::new_incident(&incident, self.vehicle_label(incident.vehicle_id));
        info!("{}", notification);
        self.incidents.push(incident);
        Some(notification)
    }

    /// Advance the simulated clock by `delta`
    ///
    /// Each timer fires once for every whole interval elapsed on its own
    /// schedule, so the incident cadence does not depend on motion.
    pub fn tick(&mut self, delta: Duration) -> Vec<Notification> {
        self.time += delta;
        let motion_interval = self.params.motion_interval();
        let incident_interval = self.params.incident_interval();

        self.motion_elapsed += delta;
        while self.motion_elapsed >= motion_interval {
            self.motion_elapsed -= motion_interval;
            self.tick_motion();
        }

        let mut notifications = Vec::new();
        self.incident_elapsed += delta;
        while self.incident_elapsed >= incident_interval {
            self.incident_elapsed -= incident_interval;
            if let Some(notification) = self.tick_incidents() {
                notifications.push(notification);
            }
        }
        notifications
    }

    /// Manual refresh: one motion step outside the regular cadence
    pub fn refresh(&mut self) {
        debug!("Manual refresh requested");
        self.tick_motion();
    }

    /// Look up a vehicle by id
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Look up an incident by id
    pub fn incident(&self, id: IncidentId) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    /// Display name of a vehicle, or a fallback label when it does not resolve
    pub fn vehicle_label(&self, id: VehicleId) -> &str {
        self.vehicle(id)
            .map(|v| v.name.as_str())
            .unwrap_or(UNKNOWN_VEHICLE_LABEL)
    }

    /// Mark one incident resolved
    ///
    /// Only that incident's `resolved` flag changes. Resolving an already
    /// resolved incident succeeds without changes.
    pub fn resolve_incident(&mut self, id: IncidentId) -> Result<Notification> {
        let incident = self
            .incidents
            .iter_mut()
            .find(|i| i.id == id)
            .with_context(|| format!("Incident {} not found", id))?;

        if incident.resolved {
            debug!("Incident {} was already resolved", id);
        } else {
            incident.resolve();
            info!("Incident {} resolved", id);
        }
        Ok(Notification::incident_resolved())
    }

    /// Select a vehicle for the detail view
    ///
    /// The id is stored even if it does not resolve; `selected_vehicle` then
    /// yields `None`.
    pub fn select_vehicle(&mut self, id: VehicleId) {
        self.selected_vehicle = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_vehicle = None;
    }

    pub fn selected_vehicle_id(&self) -> Option<VehicleId> {
        self.selected_vehicle
    }

    /// The currently selected vehicle, if any and if it still exists
    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle.and_then(|id| self.vehicle(id))
    }

    fn vehicle_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle> {
        self.vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .with_context(|| format!("Vehicle {} not found", id))
    }

    /// Change a vehicle's operational status
    pub fn set_vehicle_status(&mut self, id: VehicleId, status: VehicleStatus) -> Result<()> {
        let vehicle = self.vehicle_mut(id)?;
        vehicle.status = status;
        vehicle.last_updated = Utc::now();
        info!("Vehicle {} status changed to {}", id, status);
        Ok(())
    }

    /// Change a vehicle's speed in km/h
    pub fn set_vehicle_speed(&mut self, id: VehicleId, speed: f64) -> Result<()> {
        if !(speed >= 0.0) {
            bail!("Speed must be non-negative, got {}", speed);
        }
        let vehicle = self.vehicle_mut(id)?;
        vehicle.speed = speed;
        vehicle.last_updated = Utc::now();
        Ok(())
    }

    /// Capture the current state for serialization
    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            time: self.time.as_secs_f64(),
            vehicles: self.vehicles.clone(),
            incidents: self.incidents.clone(),
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        let open = self.incidents.iter().filter(|i| i.is_open()).count();

        println!("=== Fleet Simulation Summary ===");
        println!("Time: {:.1}s", self.time.as_secs_f64());
        println!(
            "Motion ticks: {}, Incident trials: {}",
            self.motion_ticks, self.incident_ticks
        );
        println!("Vehicles: {}", self.vehicles.len());
        println!("Incidents: {} ({} open)", self.incidents.len(), open);
        println!();

        println!("--- Vehicles ---");
        for vehicle in &self.vehicles {
            println!(
                "  {} {:<12} {:<6} {:<12} pos=({:.5}, {:.5}) speed={:.0} heading={:.1}",
                vehicle.id,
                vehicle.name,
                vehicle.vehicle_type,
                vehicle.status,
                vehicle.position.lat,
                vehicle.position.lng,
                vehicle.speed,
                vehicle.heading
            );
        }

        if !self.incidents.is_empty() {
            println!("--- Incidents ---");
            for incident in &self.incidents {
                println!(
                    "  {} {:<11} {:<6} {} ({}){}",
                    incident.id,
                    incident.incident_type,
                    incident.severity,
                    self.vehicle_label(incident.vehicle_id),
                    incident.vehicle_id,
                    if incident.resolved { " [resolved]" } else { "" }
                );
            }
        }
    }
}
