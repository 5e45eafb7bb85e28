//! Random incident emission
//!
//! A flat per-tick Bernoulli trial: on each call the emitter fires with
//! `incident_probability` and raises an incident against one vehicle chosen
//! uniformly from the current fleet.

use chrono::{DateTime, Utc};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::generator::random_incident;
use super::incident::Incident;
use super::params::SimParams;
use super::types::IncidentId;
use super::vehicle::Vehicle;

/// Source of new incidents with monotonic ids
#[derive(Debug, Clone)]
pub struct IncidentEmitter {
    next_id: u64,
}

impl Default for IncidentEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentEmitter {
    /// Emitter whose first id is `i-1`
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Emitter that continues numbering after an initial batch of `seeded` incidents
    pub fn starting_after(seeded: usize) -> Self {
        Self {
            next_id: seeded as u64 + 1,
        }
    }

    /// Id the next emitted incident will receive
    pub fn peek_next_id(&self) -> IncidentId {
        IncidentId(self.next_id)
    }

    /// Run one emission trial against `vehicles`
    ///
    /// Never fires on an empty fleet. The id counter only advances when an
    /// incident is actually produced.
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        vehicles: &[Vehicle],
        params: &SimParams,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Option<Incident> {
        if vehicles.is_empty() || !rng.random_bool(params.incident_probability) {
            return None;
        }

        let vehicle = vehicles.choose(rng)?;
        let id = IncidentId(self.next_id);
        self.next_id += 1;

        let incident = random_incident(id, vehicle, rng, now, false);
        debug!(
            "Emitted incident {} ({}) for vehicle {}",
            incident.id, incident.incident_type, incident.vehicle_id
        );
        Some(incident)
    }
}
