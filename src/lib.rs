//! Gizmo driver's station library
//!
//! Turns a team's `gsscfg.json` into a configured access-point host: hostname,
//! hostapd, dhcpcd and dnsmasq configuration, and runit service enablement.

pub mod addressing;
pub mod assets;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod paths;
pub mod render;
pub mod sanity;
pub mod station;
pub mod supervisor;

// Re-export main types for convenience
pub use addressing::ip4prefix;
pub use assets::{AssetBundle, EmbeddedAssets};
pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use config::ConfigurationRecord;
pub use error::{DsError, Result};
pub use paths::SystemPaths;
pub use render::{FsTemplateRenderer, TemplateRenderer, TemplateSpec};
pub use station::{ConfigureStep, DriverStation, DriverStationBuilder, Stage, install_packages};
pub use supervisor::{RunitSupervisor, ServiceSupervisor};
