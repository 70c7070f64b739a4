use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use edgebar::{BarEvent, BarTrigger, Config, run_app};
use tracing_error::ErrorLayer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

#[derive(Parser)]
#[command(
    name = "edgebar",
    about = "Auto-hides a top bar at the screen edge and keeps the pointer off that edge"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the controller. This is the default.
    Launch {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate the config, then print the effective settings.
    CheckConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Send a single event to the bar.
    Trigger {
        event: BarEvent,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => launch(None),
        Some(Command::Launch { config }) => launch(config),
        Some(Command::CheckConfig { config }) => check_config(config),
        Some(Command::Trigger { event, config }) => trigger(event, config),
    };
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    Config::load(path.unwrap_or_else(Config::default_path))
}

fn launch(path: Option<PathBuf>) -> Result<()> {
    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(None);
            tracing::error!("Refusing to start: {e:#}");
            return Err(e);
        }
    };
    init_tracing(config.log_filter()?);
    run_app(config)
}

fn check_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    let config = Config::load(&path)?;
    let thresholds = config.thresholds()?;
    println!("config: {}", path.display());
    println!("hide_threshold = {}", thresholds.hide());
    println!("show_threshold = {}", thresholds.show());
    println!("bouncer_threshold = {}", thresholds.bouncer());
    println!("bounce_target_offset = {}", thresholds.bounce_target());
    println!("poll_interval_ms = {}", config.poll_interval_ms);
    println!("debounce_ms = {}", config.debounce_ms);
    println!("override_modifier = {:?}", config.override_modifier);
    println!("popup_level = {}", config.popup_level);
    println!("overlay_exclusions = {:?}", config.overlay_exclusions);
    println!("bar_executable = {}", config.bar_executable.display());
    if let Some(level) = &config.log_level {
        println!("log_level = {level}");
    }
    Ok(())
}

fn trigger(event: BarEvent, path: Option<PathBuf>) -> Result<()> {
    let config = load_config(path)?;
    let status = BarTrigger::new(&config.bar_executable).send(event)?;
    if !status.success() {
        anyhow::bail!("{} exited with {status}", config.bar_executable.display());
    }
    Ok(())
}

fn init_tracing(filter: Option<EnvFilter>) {
    let filter = filter.unwrap_or_else(EnvFilter::from_default_env);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .init();
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = backtrace::Backtrace::new();
        tracing::error!("Application panicked: {panic_info}. Backtrace: {backtrace:?}");
    }));
}
