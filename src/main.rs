//! # Radio Schedule
//!
//! Fetches the current week's Monday program schedule for two FM
//! broadcasters — SBS Power FM and KBS Cool FM — normalizes the program
//! name/start-time pairs, and writes the result to a single
//! `schedule.json` document for downstream consumers (an automated
//! recording scheduler resolves storage paths through the `prefix`
//! fields).
//!
//! ## Usage
//!
//! ```sh
//! radio_schedule -o schedule.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Anchor**: compute the target Monday from today's date, once
//! 2. **Fetch**: run each source scraper sequentially and independently
//! 3. **Assemble**: convert each outcome into a `SourceResult`; a failed
//!    source degrades to an empty program list, never aborting the run
//! 4. **Output**: overwrite the JSON document and exit 0

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod models;
mod normalize;
mod outputs;
mod scrapers;
mod week;

use cli::Cli;
use models::{FetchOutcome, Schedule, SourceResult};

/// Resolve a scraper outcome into the per-source result, logging the
/// reason when the fetch failed. Failure is deliberately non-fatal: the
/// document still gets both keys, one of them with an empty list.
fn resolve_outcome(source: &str, prefix: &str, outcome: FetchOutcome) -> SourceResult {
    if let FetchOutcome::Failed(ref reason) = outcome {
        error!(source, reason = %reason, "Fetch failed; writing empty program list");
    }
    outcome.into_source_result(prefix)
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();

    let today = Local::now().date_naive();
    let monday = week::target_monday(today);
    info!(%today, %monday, "Fetching weekly schedules");

    // Sequential and independent: neither scraper shares state with or
    // depends on the other, and either may come back Failed.
    let sbs_outcome = scrapers::sbs::fetch_programs(monday).await;
    let kbs_outcome = scrapers::kbs::fetch_programs(monday).await;

    let schedule = Schedule {
        sbs: resolve_outcome("sbs", scrapers::sbs::PREFIX, sbs_outcome),
        kbs: resolve_outcome("kbs", scrapers::kbs::PREFIX, kbs_outcome),
    };
    info!(
        sbs_count = schedule.sbs.programs.len(),
        kbs_count = schedule.kbs.programs.len(),
        "Assembled schedule"
    );

    // A write failure is logged but does not change the exit status; the
    // weekly job runner retries on its own cadence.
    if let Err(e) = outputs::json::write_schedule(&schedule, &args.output).await {
        error!(path = %args.output, error = %e, "Failed to write schedule JSON");
    } else {
        info!(path = %args.output, "schedule.json updated");
    }

    Ok(())
}
