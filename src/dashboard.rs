//! Real-time dashboard runtime
//!
//! Mounting a dashboard starts two persistent periodic tasks over a shared
//! world: one applies motion, the other runs incident emission. The incident
//! task reads whatever vehicles are current when it fires, so its cadence is
//! unaffected by how often the fleet changes. Unmounting (or dropping) the
//! dashboard aborts both tasks.

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::simulation::{FleetWorld, Notification};

/// World handle shared between the timers and user actions
pub type SharedWorld = Arc<Mutex<FleetWorld>>;

/// Interval whose first tick is one full period after it is created
fn periodic(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// A mounted dashboard with its simulation timers running
pub struct Dashboard {
    world: SharedWorld,
    motion_task: JoinHandle<()>,
    incident_task: JoinHandle<()>,
}

impl Dashboard {
    /// Start the motion and incident timers over `world`
    ///
    /// Must be called from within a tokio runtime. Notifications for new
    /// incidents are sent on `notifications`; a closed receiver is ignored.
    pub fn mount(world: FleetWorld, notifications: mpsc::UnboundedSender<Notification>) -> Self {
        let motion_period = world.params().motion_interval();
        let incident_period = world.params().incident_interval();
        let world = Arc::new(Mutex::new(world));

        let motion_world = Arc::clone(&world);
        let mut motion_interval = periodic(motion_period);
        let motion_task = tokio::spawn(async move {
            loop {
                motion_interval.tick().await;
                motion_world.lock().await.tick_motion();
            }
        });

        let incident_world = Arc::clone(&world);
        let mut incident_interval = periodic(incident_period);
        let incident_task = tokio::spawn(async move {
            loop {
                incident_interval.tick().await;
                let notification = incident_world.lock().await.tick_incidents();
                if let Some(notification) = notification {
                    if notifications.send(notification).is_err() {
                        debug!("Notification receiver closed, dropping notification");
                    }
                }
            }
        });

        info!(
            "Dashboard mounted (motion every {:?}, incidents every {:?})",
            motion_period, incident_period
        );

        Self {
            world,
            motion_task,
            incident_task,
        }
    }

    /// Shared handle to the world for user actions and reads
    pub fn world(&self) -> SharedWorld {
        Arc::clone(&self.world)
    }

    /// Stop both timers and hand back the world
    pub fn unmount(self) -> SharedWorld {
        let world = Arc::clone(&self.world);
        drop(self);
        world
    }

    fn stop_timers(&self) {
        self.motion_task.abort();
        self.incident_task.abort();
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.stop_timers();
        info!("Dashboard unmounted");
    }
}
