//! Configuration pipeline stages.
//!
//! # Stage Flow
//!
//! ```text
//! Hostname → Hostapd → Dhcpcd → Dnsmasq → Enable
//! ```
//!
//! Stages run strictly in this order. The first stage to fail stops the run
//! and its error is handed back unchanged; nothing after it is attempted and
//! nothing before it is undone.

use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::info;

use crate::error::Result;

/// One named stage of `configure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Write `/etc/hostname` and apply it live
    Hostname,
    /// Render the access-point daemon configuration
    Hostapd,
    /// Render the DHCP client configuration and its pre-init options
    Dhcpcd,
    /// Render the DNS/DHCP server configuration
    Dnsmasq,
    /// Put hostapd and dnsmasq under supervision
    Enable,
}

impl Stage {
    /// Name used in logs, e.g. `"hostapd"`.
    pub fn name(self) -> String {
        self.to_string()
    }

    /// The stage that runs after this one, or `None` after `Enable`.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Hostname => Some(Self::Hostapd),
            Self::Hostapd => Some(Self::Dhcpcd),
            Self::Dhcpcd => Some(Self::Dnsmasq),
            Self::Dnsmasq => Some(Self::Enable),
            Self::Enable => None,
        }
    }

    /// Every stage in execution order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// A stage paired with the operation that performs it.
pub struct ConfigureStep<T: ?Sized> {
    pub stage: Stage,
    pub run: fn(&T) -> Result<()>,
}

impl<T: ?Sized> fmt::Debug for ConfigureStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigureStep")
            .field("stage", &self.stage)
            .finish()
    }
}

/// Run `steps` against `target` in order, stopping at the first failure.
pub fn run_steps<T: ?Sized>(target: &T, steps: &[ConfigureStep<T>]) -> Result<()> {
    for step in steps {
        info!(step = %step.stage, "Configuring");
        (step.run)(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DsError;
    use std::cell::RefCell;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            Stage::all(),
            vec![
                Stage::Hostname,
                Stage::Hostapd,
                Stage::Dhcpcd,
                Stage::Dnsmasq,
                Stage::Enable
            ]
        );
    }

    #[test]
    fn test_next_follows_declaration_order() {
        let all = Stage::all();
        for pair in all.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Stage::Enable.next(), None);
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<String> = Stage::all().into_iter().map(Stage::name).collect();
        assert_eq!(names, ["hostname", "hostapd", "dhcpcd", "dnsmasq", "enable"]);
        assert_eq!("dnsmasq".parse::<Stage>().unwrap(), Stage::Dnsmasq);
    }

    struct Recorder {
        ran: RefCell<Vec<&'static str>>,
    }

    #[test]
    fn test_run_steps_stops_at_first_failure() {
        let recorder = Recorder {
            ran: RefCell::new(Vec::new()),
        };
        let steps = [
            ConfigureStep::<Recorder> {
                stage: Stage::Hostname,
                run: |r| {
                    r.ran.borrow_mut().push("hostname");
                    Ok(())
                },
            },
            ConfigureStep {
                stage: Stage::Hostapd,
                run: |r| {
                    r.ran.borrow_mut().push("hostapd");
                    Err(DsError::config("boom"))
                },
            },
            ConfigureStep {
                stage: Stage::Dhcpcd,
                run: |r| {
                    r.ran.borrow_mut().push("dhcpcd");
                    Ok(())
                },
            },
        ];

        let err = run_steps(&recorder, &steps).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: boom");
        assert_eq!(*recorder.ran.borrow(), ["hostname", "hostapd"]);
    }
}
