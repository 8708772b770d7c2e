//! Wireless encoder
//!
//! Record to document. Radios are always emitted; SSID slots only when
//! populated.

use log::{debug, error, info};
use serde::Serialize;

use crate::model::{RadioConfig, SsidConfig, WirelessConfig};
use super::{CodecError, JsonBuffer};

#[derive(Serialize)]
struct WirelessDocument<'a> {
    wireless: WirelessBody<'a>,
}

#[derive(Serialize)]
struct WirelessBody<'a> {
    radio: &'a [RadioConfig],
    ssid: Vec<&'a SsidConfig>,
}

/// Encode `cfg` as compact JSON text
pub fn encode_wireless(cfg: &WirelessConfig) -> Result<String, CodecError> {
    let ssid: Vec<&SsidConfig> = cfg.populated_ssids().collect();
    debug!(
        "encode_wireless: {} radios, {} of {} ssid slots populated",
        cfg.radio.len(), ssid.len(), cfg.ssid.len()
    );

    let document = WirelessDocument {
        wireless: WirelessBody { radio: &cfg.radio, ssid },
    };

    serde_json::to_string(&document).map_err(|e| {
        error!("encode_wireless: serialization failed: {}", e);
        CodecError::Serialize(e.to_string())
    })
}

/// Encode `cfg` into a fixed-capacity buffer
///
/// On `BufferTooSmall` the buffer is left empty.
pub fn encode_wireless_into(cfg: &WirelessConfig, out: &mut JsonBuffer) -> Result<(), CodecError> {
    let json = encode_wireless(cfg)?;
    debug!("encode_wireless: generated JSON length={}", json.len());

    match out.write(&json) {
        Ok(()) => {
            info!("encode_wireless: JSON exported (length={})", json.len());
            Ok(())
        }
        Err(e) => {
            error!("encode_wireless: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_sparse_ssids_full_radios() {
        let mut cfg = WirelessConfig::default();
        cfg.ssid[0] = SsidConfig::named("home").unwrap();
        cfg.ssid[2] = SsidConfig::named("guest").unwrap();

        let doc: Value = serde_json::from_str(&encode_wireless(&cfg).unwrap()).unwrap();

        let ssids = doc["wireless"]["ssid"].as_array().unwrap();
        assert_eq!(ssids.len(), 2);
        assert_eq!(ssids[0]["ssid"], "home");
        assert_eq!(ssids[1]["ssid"], "guest");
        assert_eq!(doc["wireless"]["radio"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_field_order_and_names() {
        let mut cfg = WirelessConfig::default();
        cfg.ssid[0] = SsidConfig::named("net1").unwrap();
        cfg.radio[0].power = 42;

        let json = encode_wireless(&cfg).unwrap();
        assert!(json.starts_with(r#"{"wireless":{"radio":[{"power":42,"channel2g":0"#));
        assert!(json.contains(r#"{"ssid":"net1","hide":false,"security":0,"password":"","password_onscreen":false"#));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut cfg = WirelessConfig::default();
        cfg.ssid[0] = SsidConfig::named("net1").unwrap();

        let mut out = JsonBuffer::with_capacity(4);
        let err = encode_wireless_into(&cfg, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { capacity: 4, .. }));
        assert_eq!(out.as_str(), "");

        let mut out = JsonBuffer::with_capacity(4096);
        encode_wireless_into(&cfg, &mut out).unwrap();
        assert_eq!(out.as_str(), encode_wireless(&cfg).unwrap());
    }
}
