//! Service supervision.
//!
//! The pipeline only needs to mark a service as supervised from now on; how
//! that happens depends on the init system. The station image runs runit, where
//! enabling a service means linking its definition into the runsvdir.

use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::symlink;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{DsError, Result};
use crate::paths::SystemPaths;

/// Enables long-running services under supervision.
pub trait ServiceSupervisor {
    /// Mark `name` for supervised, restart-on-failure execution.
    fn enable(&self, name: &str) -> Result<()>;
}

/// runit supervisor: `/etc/sv/<name>` is linked to `/var/service/<name>`.
///
/// Definitions are looked up under the configured root, but links always
/// point at `/etc/sv` so a staged image still resolves them once booted.
#[derive(Debug, Clone)]
pub struct RunitSupervisor {
    services: PathBuf,
    link_base: PathBuf,
    runsvdir: PathBuf,
}

impl Default for RunitSupervisor {
    fn default() -> Self {
        Self::new(&SystemPaths::default())
    }
}

impl RunitSupervisor {
    pub fn new(paths: &SystemPaths) -> Self {
        Self {
            services: paths.runit_services(),
            link_base: paths.runit_services_on_target(),
            runsvdir: paths.runit_runsvdir(),
        }
    }
}

impl ServiceSupervisor for RunitSupervisor {
    fn enable(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('/') {
            return Err(DsError::service(name, "invalid service name"));
        }

        let definition = self.services.join(name);
        if !definition.is_dir() {
            return Err(DsError::service(
                name,
                format!("no service definition at {}", definition.display()),
            ));
        }

        let target = self.link_base.join(name);
        let link = self.runsvdir.join(name);
        match symlink(&target, &link) {
            Ok(()) => {
                info!(service = name, "Enabled service");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => match fs::read_link(&link) {
                Ok(existing) if existing == target => {
                    debug!(service = name, "Service already enabled");
                    Ok(())
                }
                Ok(existing) => Err(DsError::service(
                    name,
                    format!(
                        "{} already links to {}",
                        link.display(),
                        existing.display()
                    ),
                )),
                Err(_) => Err(DsError::service(
                    name,
                    format!("{} exists and is not a service link", link.display()),
                )),
            },
            Err(e) => Err(DsError::io(link, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn staged_root() -> (tempfile::TempDir, SystemPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = SystemPaths::new(dir.path());
        fs::create_dir_all(paths.runit_services().join("hostapd")).unwrap();
        fs::create_dir_all(paths.runit_runsvdir()).unwrap();
        (dir, paths)
    }

    #[test]
    fn test_enable_links_service() {
        let (_dir, paths) = staged_root();
        let sv = RunitSupervisor::new(&paths);

        sv.enable("hostapd").unwrap();

        let link = paths.runit_runsvdir().join("hostapd");
        assert_eq!(fs::read_link(&link).unwrap(), Path::new("/etc/sv/hostapd"));
    }

    #[test]
    fn test_enable_is_idempotent() {
        let (_dir, paths) = staged_root();
        let sv = RunitSupervisor::new(&paths);

        sv.enable("hostapd").unwrap();
        assert!(sv.enable("hostapd").is_ok());
    }

    #[test]
    fn test_enable_over_stale_directory_fails() {
        let (_dir, paths) = staged_root();
        fs::create_dir_all(paths.runit_runsvdir().join("hostapd")).unwrap();

        let err = RunitSupervisor::new(&paths).enable("hostapd").unwrap_err();
        assert!(matches!(err, DsError::Service { .. }));
    }

    #[test]
    fn test_enable_over_foreign_link_fails() {
        let (_dir, paths) = staged_root();
        symlink("/etc/sv/other", paths.runit_runsvdir().join("hostapd")).unwrap();

        let err = RunitSupervisor::new(&paths).enable("hostapd").unwrap_err();
        assert!(matches!(err, DsError::Service { ref reason, .. } if reason.contains("/etc/sv/other")));
    }

    #[test]
    fn test_enable_unknown_service() {
        let (_dir, paths) = staged_root();
        let err = RunitSupervisor::new(&paths).enable("dnsmasq").unwrap_err();
        assert!(matches!(err, DsError::Service { .. }));
    }

    #[test]
    fn test_enable_rejects_paths() {
        let (_dir, paths) = staged_root();
        assert!(RunitSupervisor::new(&paths).enable("../hostapd").is_err());
        assert!(RunitSupervisor::new(&paths).enable("").is_err());
    }
}
