//! Suraksha OS - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use suraksha::{
    bootstrap::{BootReport, SessionBootstrap},
    cli::{Args, Commands, Config},
    doctor::Doctor,
    logging,
    progress::{FileStorage, ProgressStore},
    repl::{DisplayManager, ReplSession, SessionState},
};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbosity());

    let mut config = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config);
    if !config.display.color {
        colored::control::set_override(false);
    }

    match args.command() {
        Commands::Start => run_repl(&args, &config).await?,
        Commands::Run { input } => run_once(&args, &config, &input.join(" ")).await?,
        Commands::Status => show_status(&config),
        Commands::Doctor => run_doctor(&config),
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// Open the persisted progress and run the session bootstrap
fn open_session(args: &Args, config: &Config) -> (SessionState, BootReport) {
    let state_dir = config.state_dir();
    debug!(state_dir = %state_dir.display(), "Opening progress store");

    let store = ProgressStore::open(Box::new(FileStorage::new(state_dir)));
    let mut session = SessionState::new(store);
    let report = SessionBootstrap::run(&mut session, &args.navigation_context());
    (session, report)
}

/// Interactive terminal
async fn run_repl(args: &Args, config: &Config) -> Result<()> {
    let (session, report) = open_session(args, config);

    let mut repl = ReplSession::with_history(config, session, config.history_path())?;
    repl.start(&report).await?;
    repl.run().await?;

    println!("\n{}", "Stay safe online, Citizen.".green());
    Ok(())
}

/// Interpret a single command without the welcome view
async fn run_once(args: &Args, config: &Config, input: &str) -> Result<()> {
    let (session, _report) = open_session(args, config);

    let mut repl = ReplSession::new(config, session)?;
    repl.handle_input(input).await?;
    Ok(())
}

fn show_status(config: &Config) {
    let store = ProgressStore::open(Box::new(FileStorage::new(config.state_dir())));
    DisplayManager::default().show_status(store.progress());
}

fn run_doctor(config: &Config) {
    let checks = Doctor::new(config.clone()).run_diagnostics();
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &Config) -> Result<()> {
    println!("\n{}\n", "Suraksha Configuration".bold().cyan());

    match Config::default_path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (no home directory)"),
    }
    println!("State dir:   {}", config.state_dir().display());
    println!("History:     {}", config.history_path().display());
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
