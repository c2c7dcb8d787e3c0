//! JSON sink for the weekly schedule document.
//!
//! Serializes the [`Schedule`] with 2-space indentation and non-ASCII
//! characters left literal (serde_json never escapes them), then
//! overwrites the destination file in place. Downstream tooling reads the
//! file on its own cadence; no locking is attempted at this run frequency.

use crate::models::Schedule;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `schedule` and overwrite the file at `path`.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_schedule(schedule: &Schedule, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(schedule)?;
    fs::write(path, json).await?;
    info!(path = %path, "Wrote schedule JSON");
    Ok(())
}
