use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use fleet_sim::dashboard::{Dashboard, SharedWorld};
use fleet_sim::simulation::{AdminOverview, FleetWorld, SimParams};

#[derive(Parser)]
#[command(name = "fleet_sim")]
#[command(about = "Fleet tracking simulation with periodic motion and incidents")]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of vehicles to seed
    #[arg(long)]
    vehicles: Option<usize>,

    /// Number of incidents in the initial history
    #[arg(long)]
    incidents: Option<usize>,

    /// Seconds to run the simulation for
    #[arg(long, default_value = "60")]
    duration: f64,

    /// Simulated seconds per step in headless mode
    #[arg(long, default_value = "1.0")]
    step: f64,

    /// Run the dashboard timers against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Print the final state as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn load_params(cli: &Cli) -> Result<SimParams> {
    let mut params = match &cli.config {
        Some(path) => SimParams::from_json_file(path)?,
        None => SimParams::default(),
    };
    if let Some(count) = cli.vehicles {
        params.vehicle_count = count;
    }
    if let Some(count) = cli.incidents {
        params.initial_incident_count = count;
    }
    Ok(params)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let duration = Duration::try_from_secs_f64(cli.duration)
        .context("--duration must be a non-negative number of seconds")?;
    let step = Duration::try_from_secs_f64(cli.step)
        .context("--step must be a positive number of seconds")?;
    if step.is_zero() {
        bail!("--step must be a positive number of seconds");
    }

    let params = load_params(&cli).context("Failed to load simulation parameters")?;
    let mut world = match cli.seed {
        Some(seed) => FleetWorld::new_with_seed(params, seed)?,
        None => FleetWorld::new(params)?,
    };
    world.seed_fleet();

    if cli.realtime {
        let world = run_realtime(world, duration, cli.json).await;
        let world = world.lock().await;
        report(&world, cli.json)
    } else {
        run_headless(&mut world, duration, step);
        report(&world, cli.json)
    }
}

/// Fast-forward a simulated clock in fixed steps
fn run_headless(world: &mut FleetWorld, duration: Duration, step: Duration) {
    info!(
        "Running headless for {:.1}s in {:.2}s steps",
        duration.as_secs_f64(),
        step.as_secs_f64()
    );

    while world.time < duration {
        let remaining = duration - world.time;
        let raised = world.tick(step.min(remaining));
        debug!(
            "Simulated {:.1}s, {} new incidents",
            world.time.as_secs_f64(),
            raised.len()
        );
    }
}

/// Mount the dashboard and let its timers run for `duration` of wall time
async fn run_realtime(world: FleetWorld, duration: Duration, quiet: bool) -> SharedWorld {
    info!("Running dashboard for {:.1}s of wall time", duration.as_secs_f64());

    let (sender, mut receiver) = mpsc::unbounded_channel();
    let dashboard = Dashboard::mount(world, sender);

    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            Some(notification) = receiver.recv() => {
                if !quiet {
                    println!("{}", notification);
                }
            }
        }
    }

    dashboard.unmount()
}

fn report(world: &FleetWorld, json: bool) -> Result<()> {
    if json {
        let snapshot = serde_json::to_string_pretty(&world.snapshot())
            .context("Failed to serialize fleet snapshot")?;
        println!("{}", snapshot);
        return Ok(());
    }

    world.print_summary();
    let overview = AdminOverview::from_world(world);
    println!("--- Overview ---");
    println!(
        "  Active: {}, Idle: {}, Maintenance: {}",
        overview.active_vehicles, overview.idle_vehicles, overview.maintenance_vehicles
    );
    println!(
        "  Open incidents: {} ({} high severity), Resolved: {}",
        overview.open_incidents, overview.critical_incidents, overview.resolved_incidents
    );
    Ok(())
}
