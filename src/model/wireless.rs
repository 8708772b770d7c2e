//! Wireless configuration record
//!
//! Field names double as the northbound wire names: the encoder serializes
//! these structs directly.

use serde::Serialize;

use super::bounded::BoundedString;

/// Number of radio slots in a wireless record
pub const MAX_RADIOS: usize = 4;

/// Number of SSID slots in a wireless record
pub const MAX_SSIDS: usize = 4;

/// Capacity of an SSID name in bytes
pub const MAX_NAME_LEN: usize = 64;

/// Capacity of an SSID passphrase in bytes
pub const MAX_PASSWORD_LEN: usize = 64;

/// Highest accepted transmit power
pub const MAX_POWER: u8 = 100;

/// SSID name
pub type SsidName = BoundedString<MAX_NAME_LEN>;

/// SSID passphrase
pub type Passphrase = BoundedString<MAX_PASSWORD_LEN>;

/// Settings of one radio
///
/// Every radio slot is treated as populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadioConfig {
    /// Transmit power, 0-100
    pub power: u8,
    /// 2.4GHz channel
    pub channel2g: u32,
    /// 5GHz channel
    pub channel5g: u32,
    /// 2.4GHz bandwidth
    pub bandwidth2g: u32,
    /// 5GHz bandwidth
    pub bandwidth5g: u32,
    /// Dynamic frequency selection
    pub dfs: bool,
    /// Airtime fairness
    pub atf: bool,
    /// Band steering
    pub bandsteering: bool,
    /// Zero-wait handoff
    pub zerowait: bool,
}

/// Settings of one network identifier
///
/// An empty name marks the slot as unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SsidConfig {
    /// Network name
    #[serde(rename = "ssid")]
    pub name: SsidName,
    /// Hidden network
    pub hide: bool,
    /// Security mode code
    pub security: u32,
    /// Passphrase, may be empty
    pub password: Passphrase,
    /// Show the passphrase on the device screen
    pub password_onscreen: bool,
    /// Enabled on 2.4GHz
    pub enable2g: bool,
    /// Enabled on 5GHz
    pub enable5g: bool,
    /// Client isolation
    pub isolation: bool,
    /// Band hopping
    pub hopping: bool,
}

impl SsidConfig {
    /// Create a populated SSID slot with default flags
    ///
    /// Returns `None` when `name` is empty or longer than the slot capacity.
    pub fn named(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: SsidName::new(name).ok()?,
            ..Self::default()
        })
    }

    /// Whether the slot holds a network
    pub fn is_populated(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Aggregate wireless configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirelessConfig {
    /// Radio slots
    pub radio: [RadioConfig; MAX_RADIOS],
    /// SSID slots
    pub ssid: [SsidConfig; MAX_SSIDS],
}

impl WirelessConfig {
    /// Reset every slot to its zero value
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// SSID slots with a non-empty name, in slot order
    pub fn populated_ssids(&self) -> impl Iterator<Item = &SsidConfig> {
        self.ssid.iter().filter(|s| s.is_populated())
    }
}
