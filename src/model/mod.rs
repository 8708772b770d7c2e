//! Data model
//!
//! Typed, fixed-capacity configuration records. One canonical record per
//! configuration type is owned by the type registry; decode and southbound
//! fetch overwrite it in place, encode reads it.

mod bounded;
mod wireless;

pub use bounded::{BoundedString, CapacityError};
pub use wireless::{
    RadioConfig, SsidConfig, WirelessConfig, SsidName, Passphrase,
    MAX_RADIOS, MAX_SSIDS, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_POWER,
};

/// A canonical record of any registered configuration type
///
/// Southbound operations receive this type instead of a concrete record, so
/// the dispatch registry stays independent of the type registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRecord {
    /// Wireless radio and SSID settings
    Wireless(WirelessConfig),
}

impl ConfigRecord {
    /// Name of the configuration type this record belongs to
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigRecord::Wireless(_) => "wireless",
        }
    }

    /// Borrow the wireless record
    pub fn as_wireless(&self) -> Option<&WirelessConfig> {
        match self {
            ConfigRecord::Wireless(cfg) => Some(cfg),
        }
    }

    /// Mutably borrow the wireless record
    pub fn as_wireless_mut(&mut self) -> Option<&mut WirelessConfig> {
        match self {
            ConfigRecord::Wireless(cfg) => Some(cfg),
        }
    }
}
