use std::process::ExitCode;

use petfriends_core::{runner, Config};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = std::env::args().nth(1);
    ExitCode::from(runner::run(Config::from_env(), scenario.as_deref()))
}
