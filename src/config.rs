//! Driver's station configuration record.
//!
//! The record is produced by the field tooling as `gsscfg.json` and names the
//! team plus the network parameters the station should advertise. Keys follow
//! that file (`Team`, `NetSSID`, ...); snake_case spellings are accepted too.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DsError, Result};

/// Immutable description of one driver's station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    /// Team number; drives the hostname and the `10.x.y` subnet.
    #[serde(rename = "Team", alias = "team")]
    pub team: u32,

    /// Field network SSID the robot joins during matches.
    #[serde(rename = "NetSSID", alias = "net_ssid", default)]
    pub net_ssid: Option<String>,

    /// WPA2 passphrase. When absent the station's own network is open.
    #[serde(rename = "NetPSK", alias = "net_psk", default)]
    pub net_psk: Option<String>,

    /// Address of the field management server, if one is running.
    #[serde(rename = "ServerIP", alias = "server_ip", default)]
    pub server_ip: Option<String>,
}

impl ConfigurationRecord {
    /// Record carrying only a team number.
    pub fn new(team: u32) -> Self {
        Self {
            team,
            net_ssid: None,
            net_psk: None,
            server_ip: None,
        }
    }

    /// Load a record from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DsError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a record from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Name written to `/etc/hostname`, e.g. `gizmoDS-301`.
    pub fn hostname(&self) -> String {
        format!("gizmoDS-{}", self.team)
    }

    /// Validate the record before it is used to touch the host
    pub fn validate(&self) -> Result<()> {
        if self.team == 0 {
            return Err(DsError::config("Team must be a positive team number"));
        }

        // hostapd refuses passphrases outside 8..=63 characters
        if let Some(psk) = &self.net_psk {
            if !(8..=63).contains(&psk.chars().count()) {
                return Err(DsError::config("NetPSK must be 8-63 characters long"));
            }
        }

        if let Some(ip) = &self.server_ip {
            if ip.parse::<std::net::Ipv4Addr>().is_err() {
                return Err(DsError::config(format!(
                    "ServerIP is not an IPv4 address: {}",
                    ip
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gsscfg_keys() {
        let record = ConfigurationRecord::from_json(
            r#"{"Team": 301, "NetSSID": "gizmo-field", "NetPSK": "correcthorse", "ServerIP": "10.0.0.2"}"#,
        )
        .unwrap();
        assert_eq!(record.team, 301);
        assert_eq!(record.net_ssid.as_deref(), Some("gizmo-field"));
        assert_eq!(record.net_psk.as_deref(), Some("correcthorse"));
        assert_eq!(record.server_ip.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn test_parse_snake_case_and_extra_keys() {
        let record =
            ConfigurationRecord::from_json(r#"{"team": 42, "UseDriverStation": true}"#).unwrap();
        assert_eq!(record, ConfigurationRecord::new(42));
    }

    #[test]
    fn test_team_is_required() {
        let err = ConfigurationRecord::from_json(r#"{"NetSSID": "x"}"#).unwrap_err();
        assert!(matches!(err, DsError::Json(_)));
    }

    #[test]
    fn test_negative_team_rejected() {
        assert!(ConfigurationRecord::from_json(r#"{"Team": -1}"#).is_err());
    }

    #[test]
    fn test_hostname() {
        assert_eq!(ConfigurationRecord::new(301).hostname(), "gizmoDS-301");
    }

    #[test]
    fn test_validate() {
        assert!(ConfigurationRecord::new(301).validate().is_ok());
        assert!(ConfigurationRecord::new(0).validate().is_err());

        let mut record = ConfigurationRecord::new(301);
        record.net_psk = Some("short".to_string());
        assert!(record.validate().is_err());

        record.net_psk = Some("long enough".to_string());
        record.server_ip = Some("fms.local".to_string());
        assert!(record.validate().is_err());

        record.server_ip = Some("10.0.0.2".to_string());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigurationRecord::load_from_file("/nonexistent/gsscfg.json").unwrap_err();
        assert!(matches!(err, DsError::Io { .. }));
    }
}
