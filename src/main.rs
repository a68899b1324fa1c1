mod app;
mod config;
mod pump;
mod share;
mod stopwatch;
mod terminal;
mod ui;

use std::fs::OpenOptions;

use anyhow::{Context, Result};

use crate::app::StopwatchApp;
use crate::config::Config;

const APP_NAME: &str = "Stopwatch";

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;

    // RUST_LOG, when set, overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.level_filter()?)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")
}

fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config)?;
    log::info!("{} PID is {}", APP_NAME, std::process::id());
    match &config.source {
        Some(path) => log::info!("config loaded from {:?}", path),
        None => log::warn!("no config file found, using defaults"),
    }

    let share = share::from_config(&config.share);
    let (tx, rx) = crossbeam_channel::unbounded();

    let mut tui = terminal::init()?;
    terminal::spawn_input_thread(tx.clone());
    let mut app = StopwatchApp::new(tx, share, config.share.link.clone());

    let result = terminal::run_loop(&mut tui, &mut app, &rx);

    // Clean up
    app.shutdown();
    terminal::restore(&mut tui)?;
    log::info!("{} exiting", APP_NAME);
    result
}
