//! Host paths touched by the configuration pipeline.
//!
//! The locations are fixed by the OS conventions of the station image; only
//! the root they are resolved under can change, which lets the pipeline run
//! against a staging tree instead of `/`.

use std::path::{Path, PathBuf};

const HOSTNAME: &str = "etc/hostname";
const HOSTAPD_CONF: &str = "etc/hostapd/hostapd.conf";
const DNSMASQ_CONF: &str = "etc/dnsmasq.conf";
const DHCPCD_CONF: &str = "etc/dhcpcd.conf";
const DHCPCD_PRE: &str = "etc/sv/dhcpcd/conf";
const RUNIT_SERVICES: &str = "etc/sv";
const RUNIT_RUNSVDIR: &str = "var/service";

/// Resolves every file the station writes under a single root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    root: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SystemPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn hostname(&self) -> PathBuf {
        self.root.join(HOSTNAME)
    }

    pub fn hostapd_conf(&self) -> PathBuf {
        self.root.join(HOSTAPD_CONF)
    }

    pub fn dnsmasq_conf(&self) -> PathBuf {
        self.root.join(DNSMASQ_CONF)
    }

    pub fn dhcpcd_conf(&self) -> PathBuf {
        self.root.join(DHCPCD_CONF)
    }

    /// runit `conf` file sourced by the dhcpcd service before it starts.
    pub fn dhcpcd_pre(&self) -> PathBuf {
        self.root.join(DHCPCD_PRE)
    }

    /// Directory holding runit service definitions (`/etc/sv`).
    pub fn runit_services(&self) -> PathBuf {
        self.root.join(RUNIT_SERVICES)
    }

    /// `/etc/sv` as the booted system sees it, whatever the root. Symlinks
    /// written into the root must point here.
    pub fn runit_services_on_target(&self) -> PathBuf {
        Path::new("/").join(RUNIT_SERVICES)
    }

    /// Directory scanned by runsvdir for enabled services (`/var/service`).
    pub fn runit_runsvdir(&self) -> PathBuf {
        self.root.join(RUNIT_RUNSVDIR)
    }
}
