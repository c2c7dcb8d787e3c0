//! Command-line interface definitions for the schedule fetcher.
//!
//! This module defines the CLI arguments using the `clap` crate. The tool
//! is designed to run unattended from a weekly job, so everything has a
//! default; the only knob is where the output document lands.

use clap::Parser;

/// Command-line arguments for the weekly schedule fetcher.
///
/// # Examples
///
/// ```sh
/// # Write schedule.json into the working directory
/// radio_schedule
///
/// # Write somewhere else
/// radio_schedule -o /var/lib/recorder/schedule.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Destination path for the schedule JSON document
    #[arg(short, long, default_value = "schedule.json")]
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_output() {
        let cli = Cli::parse_from(["radio_schedule"]);
        assert_eq!(cli.output, "schedule.json");
    }

    #[test]
    fn test_cli_output_flag() {
        let cli = Cli::parse_from(["radio_schedule", "-o", "/tmp/schedule.json"]);
        assert_eq!(cli.output, "/tmp/schedule.json");
    }
}
