use std::env;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info, warn};

mod clock;
mod config;
mod display;
mod input;
mod logging;
mod pomodoro;
mod shutdown;

use config::args::{self, CliArgs};
use config::config::Config;
use display::terminal::TerminalMatrix;
use input::listener::{self, StdinButton};
use pomodoro::runner::Pomodoro;
use shutdown::ShutdownReason;

const EXIT_STARTUP_FAILED: u8 = 2;

fn load_config(cli: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run(config: Config) -> anyhow::Result<ShutdownReason> {
    let display = TerminalMatrix::open().context("Cannot start without the LED matrix")?;

    let (trigger, shutdown) = shutdown::channel();

    if let Err(e) = listener::spawn(StdinButton, trigger.clone()) {
        warn!("Could not start the input listener, exit on button press disabled: {}", e);
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.fire(ShutdownReason::Interrupt);
        }
    });

    let mut pomodoro = Pomodoro::new(display, config, shutdown);
    let reason = pomodoro.run().await;
    info!("{}", pomodoro.stats().summary());
    Ok(reason)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match CliArgs::parse_from(env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            args::print_help();
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    };

    if cli.help {
        args::print_help();
        return ExitCode::SUCCESS;
    }

    let log_path = cli.log_path.clone().unwrap_or_else(logging::default_log_path);
    logging::init(cli.verbose, &log_path);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            // The log file is out of sight, so say it on the terminal too
            eprintln!("Invalid configuration: {:#}", e);
            error!("Invalid configuration: {:#}", e);
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    };

    info!("🍅 Pomodoro matrix v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "{}min work / {}min short break / {}min long break",
        config.work_minutes, config.short_break_minutes, config.long_break_minutes
    );
    info!(
        "Display: rotation {}°, low light {}",
        config.rotation.degrees(),
        if config.low_light { "on" } else { "off" }
    );
    info!("Logging to {}", log_path.display());
    info!("Press Enter or Ctrl+C to quit");

    match run(config).await {
        Ok(reason) => ExitCode::from(reason.exit_code()),
        Err(e) => {
            eprintln!("{:#}", e);
            error!("{:#}", e);
            ExitCode::from(EXIT_STARTUP_FAILED)
        }
    }
}
