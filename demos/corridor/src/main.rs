//! corridor — demo CLI for the railway decision-support core.
//!
//! ```text
//! corridor <topology.json> <schedule.json> [event.json]
//! ```
//!
//! Loads the network, optionally applies one disruption event, runs all
//! three optimization strategies on deep-copied twins, and prints a JSON
//! report (per-strategy outcomes plus a state snapshot) to stdout.
//!
//! Exit code 0 on success; non-zero when the topology or schedule fails to
//! load, or the event cannot be applied.
//!
//! Sample inputs live in `data/`:
//!
//! ```text
//! corridor data/topology.json data/schedule.json data/event.json
//! ```

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use rail_optimizer::Optimizer;
use rail_twin::{Event, Network};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(topology_path), Some(schedule_path)) = (args.next(), args.next()) else {
        bail!("usage: corridor <topology.json> <schedule.json> [event.json]");
    };
    let event_path = args.next();

    let mut network = Network::from_files(&topology_path, &schedule_path)
        .with_context(|| format!("loading network from {topology_path} + {schedule_path}"))?;

    if let Some(path) = &event_path {
        let file = File::open(path).with_context(|| format!("opening event file {path}"))?;
        let event: Event =
            serde_json::from_reader(BufReader::new(file)).context("parsing event envelope")?;
        network
            .apply_event(&event)
            .context("applying disruption event")?;
    }

    let outcomes = Optimizer::default().run_all_strategies(&network);

    let report = serde_json::json!({
        "strategies": outcomes,
        "network_state": network.state_snapshot(),
    });
    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &report)?;
    println!();

    Ok(())
}
