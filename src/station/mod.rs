//! The driver's station facade.
//!
//! A [`DriverStation`] binds one configuration record to the capabilities it
//! needs to turn that record into host state: a template renderer, a service
//! supervisor and a command runner. It is built once per invocation through
//! [`DriverStationBuilder`] and used by a single caller; there is no locking,
//! so two stations must never run against the same host at once.

mod pipeline;

pub use pipeline::{ConfigureStep, Stage, run_steps};

use std::fs;
use std::path::Path;
use tracing::{Span, error, info, info_span};

use crate::assets::{DHCPCD_CONF, DHCPCD_PRE, DNSMASQ_CONF, HOSTAPD_CONF};
use crate::command::{CommandRunner, SystemCommandRunner};
use crate::config::ConfigurationRecord;
use crate::error::{DsError, Result};
use crate::paths::SystemPaths;
use crate::render::{FsTemplateRenderer, TemplateRenderer, TemplateSpec};
use crate::supervisor::{RunitSupervisor, ServiceSupervisor};

/// Packages that must be present for the station to work.
pub const PACKAGES: &[&str] = &["hostapd", "dnsmasq"];

/// Services put under supervision by the `enable` stage.
pub const SERVICES: &[&str] = &["hostapd", "dnsmasq"];

const PACKAGE_MANAGER: &str = "xbps-install";
/// Sync the repository index, update, assume yes.
const PACKAGE_MANAGER_FLAGS: &str = "-Suy";
const HOSTNAME_COMMAND: &str = "hostname";

/// Install the packages the station depends on.
///
/// Needs no configuration record. Succeeds when the package manager exits
/// zero; whether anything was actually installed or upgraded is not checked.
pub fn install_packages(runner: &dyn CommandRunner) -> Result<()> {
    let mut args = vec![PACKAGE_MANAGER_FLAGS];
    args.extend_from_slice(PACKAGES);

    info!(packages = ?PACKAGES, "Installing packages");
    runner.run(PACKAGE_MANAGER, &args)?;
    Ok(())
}

/// Configures a host as a team's driver's station.
pub struct DriverStation {
    cfg: ConfigurationRecord,
    span: Span,
    paths: SystemPaths,
    apply_live: bool,
    svc: Box<dyn ServiceSupervisor>,
    renderer: Box<dyn TemplateRenderer>,
    runner: Box<dyn CommandRunner>,
}

impl std::fmt::Debug for DriverStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverStation")
            .field("cfg", &self.cfg)
            .field("paths", &self.paths)
            .field("apply_live", &self.apply_live)
            .finish_non_exhaustive()
    }
}

impl DriverStation {
    pub fn builder(cfg: ConfigurationRecord) -> DriverStationBuilder {
        DriverStationBuilder::new(cfg)
    }

    pub fn config(&self) -> &ConfigurationRecord {
        &self.cfg
    }

    pub fn paths(&self) -> &SystemPaths {
        &self.paths
    }

    /// Install the packages the station depends on with this station's runner.
    pub fn install(&self) -> Result<()> {
        let _guard = self.span.enter();
        install_packages(self.runner.as_ref())
    }

    /// The ordered stages `configure` runs.
    pub fn steps() -> Vec<ConfigureStep<Self>> {
        vec![
            ConfigureStep {
                stage: Stage::Hostname,
                run: Self::configure_hostname,
            },
            ConfigureStep {
                stage: Stage::Hostapd,
                run: Self::configure_hostapd,
            },
            ConfigureStep {
                stage: Stage::Dhcpcd,
                run: Self::configure_dhcpcd,
            },
            ConfigureStep {
                stage: Stage::Dnsmasq,
                run: Self::configure_dnsmasq,
            },
            ConfigureStep {
                stage: Stage::Enable,
                run: Self::enable_services,
            },
        ]
    }

    /// Write every configuration file and enable the network services.
    ///
    /// Stages run in [`Stage`] order and the first failure is returned
    /// unchanged. Stages already applied stay applied. Every stage overwrites
    /// its targets, so re-running after fixing the cause is safe.
    pub fn configure(&self) -> Result<()> {
        let _guard = self.span.enter();
        run_steps(self, &Self::steps())?;
        info!(team = self.cfg.team, "Driver's station configured");
        Ok(())
    }

    fn configure_hostname(&self) -> Result<()> {
        let hostname = self.cfg.hostname();
        let path = self.paths.hostname();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DsError::io(parent, e))?;
        }
        fs::write(&path, format!("{}\n", hostname)).map_err(|e| {
            error!(file = %path.display(), error = %e, "Error writing hostname");
            DsError::io(&path, e)
        })?;

        if self.apply_live {
            let team = self.cfg.team.to_string();
            self.runner.run(HOSTNAME_COMMAND, &[team.as_str()])?;
        }
        Ok(())
    }

    fn configure_hostapd(&self) -> Result<()> {
        self.render(&self.paths.hostapd_conf(), HOSTAPD_CONF, Some(&self.cfg))
    }

    fn configure_dhcpcd(&self) -> Result<()> {
        self.render(&self.paths.dhcpcd_conf(), DHCPCD_CONF, Some(&self.cfg))?;
        self.render(&self.paths.dhcpcd_pre(), DHCPCD_PRE, None)
    }

    fn configure_dnsmasq(&self) -> Result<()> {
        self.render(&self.paths.dnsmasq_conf(), DNSMASQ_CONF, Some(&self.cfg))
    }

    // Enablement failures are logged but never fail the run; the files are
    // in place and the services can be linked by hand.
    fn enable_services(&self) -> Result<()> {
        for service in SERVICES {
            if let Err(e) = self.svc.enable(service) {
                error!(service, error = %e, "Error enabling service");
            }
        }
        Ok(())
    }

    fn render(
        &self,
        target: &Path,
        source: &str,
        data: Option<&ConfigurationRecord>,
    ) -> Result<()> {
        self.renderer.render(TemplateSpec {
            target,
            source,
            data,
        })
    }
}

/// Builds a [`DriverStation`], defaulting every capability to the real host.
pub struct DriverStationBuilder {
    cfg: ConfigurationRecord,
    span: Option<Span>,
    paths: SystemPaths,
    apply_live: bool,
    svc: Option<Box<dyn ServiceSupervisor>>,
    renderer: Option<Box<dyn TemplateRenderer>>,
    runner: Option<Box<dyn CommandRunner>>,
}

impl DriverStationBuilder {
    pub fn new(cfg: ConfigurationRecord) -> Self {
        Self {
            cfg,
            span: None,
            paths: SystemPaths::default(),
            apply_live: true,
            svc: None,
            renderer: None,
            runner: None,
        }
    }

    /// Span every log event of the station is recorded under.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Resolve all host paths under `paths` instead of `/`.
    pub fn paths(mut self, paths: SystemPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Whether the hostname is also applied to the running system. Turn off
    /// when configuring a staged root for another machine.
    pub fn apply_live(mut self, apply_live: bool) -> Self {
        self.apply_live = apply_live;
        self
    }

    pub fn supervisor(mut self, svc: impl ServiceSupervisor + 'static) -> Self {
        self.svc = Some(Box::new(svc));
        self
    }

    pub fn renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    pub fn build(self) -> DriverStation {
        let paths = self.paths;
        let svc = self
            .svc
            .unwrap_or_else(|| Box::new(RunitSupervisor::new(&paths)));

        DriverStation {
            span: self
                .span
                .unwrap_or_else(|| info_span!("ds", team = self.cfg.team)),
            cfg: self.cfg,
            svc,
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(FsTemplateRenderer::default())),
            runner: self
                .runner
                .unwrap_or_else(|| Box::new(SystemCommandRunner)),
            paths,
            apply_live: self.apply_live,
        }
    }
}
