//! Bundled template assets.
//!
//! Templates are compiled into the binary so the renderer never reads from
//! the filesystem it is writing to. Lookups go through [`AssetBundle`] so
//! tests can hand the renderer their own sources.

/// Template for the access-point daemon configuration.
pub const HOSTAPD_CONF: &str = "hostapd.conf.tpl";
/// Template for the DHCP client daemon configuration.
pub const DHCPCD_CONF: &str = "dhcpcd.conf.tpl";
/// Template for the DHCP client service pre-init options. Takes no data.
pub const DHCPCD_PRE: &str = "dhcpcd.pre.tpl";
/// Template for the DNS/DHCP server configuration.
pub const DNSMASQ_CONF: &str = "dnsmasq.conf.tpl";

const BUNDLED: &[(&str, &str)] = &[
    (HOSTAPD_CONF, include_str!("../tpl/hostapd.conf.tpl")),
    (DHCPCD_CONF, include_str!("../tpl/dhcpcd.conf.tpl")),
    (DHCPCD_PRE, include_str!("../tpl/dhcpcd.pre.tpl")),
    (DNSMASQ_CONF, include_str!("../tpl/dnsmasq.conf.tpl")),
];

/// Read-only source of template text, keyed by name.
pub trait AssetBundle {
    /// Returns the template source for `name`, or `None` if it is not bundled.
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// The templates shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetBundle for EmbeddedAssets {
    fn lookup(&self, name: &str) -> Option<&str> {
        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == name)
            .map(|(_, source)| *source)
    }
}

impl EmbeddedAssets {
    /// Names of every bundled template.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(name, _)| *name)
    }
}
