//! Transient notifications for the consuming layer

use serde::Serialize;
use std::fmt;

use super::incident::Incident;
use super::types::Severity;

/// Label used when an incident's vehicle cannot be found
pub const UNKNOWN_VEHICLE_LABEL: &str = "Unknown Vehicle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A short message shown once and then discarded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    /// Announce a newly raised incident for the vehicle labelled `vehicle_label`
    pub fn new_incident(incident: &Incident, vehicle_label: &str) -> Self {
        let variant = if incident.severity == Severity::High {
            NotificationVariant::Destructive
        } else {
            NotificationVariant::Default
        };
        Self {
            title: format!("New {} detected", incident.incident_type),
            description: format!("{} for {}", incident.description, vehicle_label),
            variant,
        }
    }

    pub fn incident_resolved() -> Self {
        Self {
            title: "Incident resolved".to_string(),
            description: "The incident has been marked as resolved.".to_string(),
            variant: NotificationVariant::Default,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
