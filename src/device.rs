//! Device identity records.

use serde::Serialize;

/// MAC prefix (OUI) assigned to Grandstream Networks.
///
/// Compared case-insensitively against the start of every roster MAC.
pub const VENDOR_PREFIX: &str = "000B82";

/// Identity of one provisionable phone.
///
/// The MAC is kept exactly as it appeared in the roster; it flows unchanged
/// into the output file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// MAC address as read from the roster.
    pub mac: String,

    /// SIP user ID.
    pub user: String,

    /// SIP authentication password.
    pub password: String,

    /// SIP authentication ID.
    pub auth_id: String,
}

impl Device {
    /// Creates a new device record.
    #[must_use]
    pub fn new(
        mac: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        auth_id: impl Into<String>,
    ) -> Self {
        Self {
            mac: mac.into(),
            user: user.into(),
            password: password.into(),
            auth_id: auth_id.into(),
        }
    }

    /// Returns `true` if the MAC starts with [`VENDOR_PREFIX`], ignoring case.
    #[must_use]
    pub fn has_vendor_prefix(&self) -> bool {
        has_vendor_prefix(&self.mac)
    }
}

/// Returns `true` if `mac` starts with [`VENDOR_PREFIX`], ignoring ASCII case.
#[must_use]
pub fn has_vendor_prefix(mac: &str) -> bool {
    mac.get(..VENDOR_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(VENDOR_PREFIX))
}
