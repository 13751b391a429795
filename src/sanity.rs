//! Pre-flight checks for the runtime environment
//!
//! Configuring the station writes under `/etc`, links runit services and
//! changes the live hostname, all of which need root. The check runs before
//! any stage so a non-root run fails without leaving half a configuration.

use std::path::Path;

/// Result of environment verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityCheckResult {
    pub is_root: bool,
    /// Whether the target root is the live system rather than a staging tree.
    pub live_root: bool,
}

impl SanityCheckResult {
    /// Staged roots can be written by any user that owns them.
    pub fn is_ok(&self) -> bool {
        self.is_root || !self.live_root
    }

    /// Human-readable reason the check failed, if it did.
    pub fn failure(&self) -> Option<String> {
        if self.is_ok() {
            return None;
        }
        Some(
            "root privileges required to configure the driver's station; run with sudo or as root"
                .to_string(),
        )
    }
}

/// Check if running as root (EUID 0)
fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Whether `root` names the running system's `/`, however it is spelled
/// (`//`, `/.`, a symlink to `/`). A root that cannot be resolved does not
/// exist yet and so is a staging tree.
pub fn is_live_root(root: &Path) -> bool {
    root.canonicalize()
        .map(|resolved| resolved == Path::new("/"))
        .unwrap_or(false)
}

/// Perform all sanity checks for a run targeting `root`
pub fn verify_environment(root: &Path) -> SanityCheckResult {
    let result = SanityCheckResult {
        is_root: is_running_as_root(),
        live_root: is_live_root(root),
    };
    tracing::debug!(?result, "Pre-flight check");
    result
}
