//! Fleet Simulation Library
//!
//! A fleet-tracking simulation that can be stepped headless or driven in
//! real time by the dashboard timers.

pub mod auth;
pub mod dashboard;
pub mod simulation;
