use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gizmo - configuration tools for the Gizmo competition platform
#[derive(Parser)]
#[command(name = "gizmo")]
#[command(about = "Entrypoint for all Gizmo commands")]
#[command(
    long_about = "The Gizmo Platform provides servers for field control, configuration for your joysticks, and tools to program the system processor on your robot control board."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Driver's station management
    Ds {
        #[command(subcommand)]
        ds_command: DsCommands,
    },
}

#[derive(Subcommand)]
pub enum DsCommands {
    /// Read the gsscfg.json and configure the driver's station
    ///
    /// Uses the configuration file to configure the operating system. This
    /// expects that prerequisite installation has been completed previously.
    Configure {
        /// Path to the gsscfg.json configuration file
        config: PathBuf,

        /// Configure a staged root filesystem instead of the running system
        #[arg(long, default_value = "/")]
        root: PathBuf,
    },
    /// Install the packages the driver's station needs
    Install,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["gizmo"]).is_err());
    }

    #[test]
    fn test_cli_ds_configure() {
        let cli = Cli::try_parse_from(["gizmo", "ds", "configure", "/boot/gsscfg.json"]).unwrap();
        match cli.command {
            Commands::Ds {
                ds_command: DsCommands::Configure { config, root },
            } => {
                assert_eq!(config, PathBuf::from("/boot/gsscfg.json"));
                assert_eq!(root, PathBuf::from("/"));
            }
            _ => panic!("Expected ds configure command"),
        }
    }

    #[test]
    fn test_cli_ds_configure_takes_exactly_one_path() {
        assert!(Cli::try_parse_from(["gizmo", "ds", "configure"]).is_err());
        assert!(Cli::try_parse_from(["gizmo", "ds", "configure", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_cli_ds_configure_staged_root() {
        let cli = Cli::try_parse_from([
            "gizmo",
            "ds",
            "configure",
            "--root",
            "/mnt/image",
            "gsscfg.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Ds {
                ds_command: DsCommands::Configure { root, .. },
            } => assert_eq!(root, PathBuf::from("/mnt/image")),
            _ => panic!("Expected ds configure command"),
        }
    }

    #[test]
    fn test_cli_ds_install() {
        let cli = Cli::try_parse_from(["gizmo", "ds", "install"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Ds {
                ds_command: DsCommands::Install
            }
        ));
    }
}
