//! What the `petfriends-scenarios` binary does between reading its inputs
//! and exiting.
//!
//! Exit codes: `0` when every selected scenario passed, `1` when any failed,
//! `2` when the run could not start (bad configuration or an unknown
//! scenario name).

use tracing::{error, info};

use crate::catalog;
use crate::config::Config;
use crate::error::ConfigError;
use crate::scenario::{run_all, RunReport, Scenario};
use crate::session::PetFriends;
use crate::transport::{Transport, UreqTransport};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// The whole catalog, or the one scenario called `name`.
pub fn select<T: Transport>(name: Option<&str>) -> Result<Vec<Scenario<T>>, ConfigError> {
    match name {
        Some(name) => catalog::find(name)
            .map(|scenario| vec![scenario])
            .ok_or_else(|| ConfigError::UnknownScenario(name.to_string())),
        None => Ok(catalog::catalog()),
    }
}

pub fn exit_code(report: &RunReport) -> u8 {
    if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Run the selected scenarios against `config.base_url` over ureq.
pub fn run(config: Result<Config, ConfigError>, scenario: Option<&str>) -> u8 {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return EXIT_USAGE;
        }
    };
    let scenarios = match select::<UreqTransport>(scenario) {
        Ok(scenarios) => scenarios,
        Err(e) => {
            error!(error = %e, "cannot start");
            return EXIT_USAGE;
        }
    };

    info!(base_url = %config.base_url, count = scenarios.len(), "running scenarios");
    let api = PetFriends::new(&config.base_url);
    let report = run_all(&api, &config, &scenarios);

    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            error!(scenario = outcome.name, error = %e, "scenario failed");
        }
    }
    info!(passed = report.passed(), failed = report.failed(), "done");
    exit_code(&report)
}
