//! Wireless decoder
//!
//! Document to record. Lenient: trusts the validator and substitutes zero
//! values for anything missing or mistyped.

use log::{debug, error};
use serde_json::{Map, Value};

use crate::model::{RadioConfig, SsidConfig, WirelessConfig, MAX_RADIOS, MAX_SSIDS};
use super::{fields, CodecError};

/// Decode a wireless document into `cfg`
///
/// `cfg` is cleared first, so nothing from a previous decode survives, even
/// when this call fails. Arrays are read up to the record capacity.
pub fn decode_wireless(document: &str, cfg: &mut WirelessConfig) -> Result<(), CodecError> {
    cfg.clear();

    let root: Value = serde_json::from_str(document).map_err(|e| {
        error!("decode_wireless: failed to parse JSON: {}", e);
        CodecError::Parse(e.to_string())
    })?;

    let wireless = root
        .get("wireless")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            error!("decode_wireless: 'wireless' object not found");
            CodecError::MissingSection("wireless")
        })?;

    match wireless.get("radio").and_then(Value::as_array) {
        Some(radios) => {
            debug!("decode_wireless: found radio array with {} elements", radios.len());
            for (i, item) in radios.iter().take(MAX_RADIOS).enumerate() {
                if let Some(obj) = item.as_object() {
                    cfg.radio[i] = decode_radio(obj);
                    debug!("decode_wireless: radio[{}] = {:?}", i, cfg.radio[i]);
                }
            }
        }
        None => error!("decode_wireless: 'radio' array not found in 'wireless'"),
    }

    match wireless.get("ssid").and_then(Value::as_array) {
        Some(ssids) => {
            debug!("decode_wireless: found ssid array with {} elements", ssids.len());
            for (i, item) in ssids.iter().take(MAX_SSIDS).enumerate() {
                if let Some(obj) = item.as_object() {
                    cfg.ssid[i] = decode_ssid(obj, &format!("wireless.ssid[{}]", i));
                    debug!(
                        "decode_wireless: ssid[{}] name='{}' security={} password_len={}",
                        i, cfg.ssid[i].name, cfg.ssid[i].security, cfg.ssid[i].password.len()
                    );
                }
            }
        }
        None => error!("decode_wireless: 'ssid' array not found in 'wireless'"),
    }

    Ok(())
}

fn decode_radio(obj: &Map<String, Value>) -> RadioConfig {
    RadioConfig {
        power: fields::integer(obj, "power"),
        channel2g: fields::integer(obj, "channel2g"),
        channel5g: fields::integer(obj, "channel5g"),
        bandwidth2g: fields::integer(obj, "bandwidth2g"),
        bandwidth5g: fields::integer(obj, "bandwidth5g"),
        dfs: fields::boolean(obj, "dfs"),
        atf: fields::boolean(obj, "atf"),
        bandsteering: fields::boolean(obj, "bandsteering"),
        zerowait: fields::boolean(obj, "zerowait"),
    }
}

fn decode_ssid(obj: &Map<String, Value>, path: &str) -> SsidConfig {
    SsidConfig {
        name: fields::text(obj, "ssid", path),
        hide: fields::boolean(obj, "hide"),
        security: fields::integer(obj, "security"),
        password: fields::text(obj, "password", path),
        password_onscreen: fields::boolean(obj, "password_onscreen"),
        enable2g: fields::boolean(obj, "enable2g"),
        enable5g: fields::boolean(obj, "enable5g"),
        isolation: fields::boolean(obj, "isolation"),
        hopping: fields::boolean(obj, "hopping"),
    }
}
