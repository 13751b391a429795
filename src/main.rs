//! Gizmo - main entry point

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

use gizmo_ds::cli::{Cli, Commands, DsCommands};
use gizmo_ds::{
    install_packages, sanity, ConfigurationRecord, DriverStation, SystemCommandRunner, SystemPaths,
};

/// Initialize the logger; `LOG_LEVEL` selects the level, defaulting to info
fn init_logger() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Commands::Ds { ds_command } => run_ds(ds_command),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_ds(command: DsCommands) -> Result<()> {
    match command {
        DsCommands::Configure { config, root } => configure(&config, &root),
        DsCommands::Install => install(),
    }
}

fn preflight(root: &Path) -> Result<()> {
    if let Some(reason) = sanity::verify_environment(root).failure() {
        anyhow::bail!(reason);
    }
    Ok(())
}

fn configure(config_path: &Path, root: &Path) -> Result<()> {
    let cfg = ConfigurationRecord::load_from_file(config_path)
        .with_context(|| format!("Error loading config {}", config_path.display()))?;
    cfg.validate().context("Error validating config")?;
    preflight(root)?;

    info!(team = cfg.team, root = %root.display(), "Configuring driver's station");
    let ds = DriverStation::builder(cfg)
        .span(info_span!("field"))
        .paths(SystemPaths::new(root))
        .apply_live(sanity::is_live_root(root))
        .build();

    ds.configure().context("Error configuring")
}

fn install() -> Result<()> {
    preflight(Path::new("/"))?;

    let _guard = info_span!("field").entered();
    install_packages(&SystemCommandRunner).context("Error installing packages")
}
