//! End-to-end pipeline tests
//!
//! Drive `ConfigManager` the way a device management service would, with an
//! echoing in-memory backend.

use std::sync::Arc;

use serde_json::{json, Value};

use devconf::codec::{decode_wireless, encode_wireless, JsonBuffer};
use devconf::model::{SsidConfig, WirelessConfig};
use devconf::pipeline::{ConfigManager, ErrorKind};
use devconf::registry::TypeRegistry;
use devconf::schema::{FieldRule, RADIO_FIELDS, SSID_FIELDS, WIRELESS_SCHEMA};
use devconf::southbound::{MemoryBackend, SouthboundRegistry};

fn radio() -> Value {
    json!({
        "power": 80, "channel2g": 6, "channel5g": 36, "bandwidth2g": 20, "bandwidth5g": 80,
        "dfs": false, "atf": true, "bandsteering": true, "zerowait": false
    })
}

fn ssid(name: &str) -> Value {
    json!({
        "ssid": name, "hide": false, "security": 3, "password": "abc123",
        "password_onscreen": false, "enable2g": true, "enable5g": true,
        "isolation": false, "hopping": false
    })
}

fn document(radios: Vec<Value>, ssids: Vec<Value>) -> String {
    json!({ "wireless": { "radio": radios, "ssid": ssids } }).to_string()
}

fn echo_manager() -> (ConfigManager, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let manager = ConfigManager::new(
        TypeRegistry::with_defaults(),
        SouthboundRegistry::for_backend(backend.clone()),
    );
    (manager, backend)
}

fn full_record() -> WirelessConfig {
    let mut cfg = WirelessConfig::default();
    for (i, radio) in cfg.radio.iter_mut().enumerate() {
        radio.power = 25 * i as u8;
        radio.channel2g = 1 + i as u32;
        radio.channel5g = 36 + 4 * i as u32;
        radio.bandwidth2g = 20;
        radio.bandwidth5g = 80;
        radio.dfs = i % 2 == 0;
        radio.atf = true;
        radio.bandsteering = i % 2 == 1;
        radio.zerowait = true;
    }
    for (i, slot) in cfg.ssid.iter_mut().enumerate() {
        let mut s = SsidConfig::named(&format!("net{}", i)).unwrap();
        s.security = i as u32;
        s.password = "p".repeat(64).as_str().try_into().unwrap();
        s.password_onscreen = true;
        s.enable2g = true;
        s.hopping = i == 3;
        *slot = s;
    }
    cfg
}

fn sorted_names(rules: &[FieldRule]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = rules.iter().map(|r| r.name).collect();
    names.sort_unstable();
    names
}

#[test]
fn test_set_then_get_end_to_end() {
    let (manager, backend) = echo_manager();
    let doc = document(vec![radio()], vec![ssid("net1")]);

    assert!(manager.config_set("wireless", &doc));
    assert_eq!(backend.apply_count(), 1);

    let mut out = JsonBuffer::with_capacity(4096);
    assert!(manager.config_get("wireless", &mut out));

    let result: Value = serde_json::from_str(out.as_str()).unwrap();
    let ssids = result["wireless"]["ssid"].as_array().unwrap();
    assert_eq!(ssids.len(), 1);
    assert_eq!(ssids[0]["ssid"], "net1");
    assert_eq!(ssids[0]["password"], "abc123");
    assert_eq!(result["wireless"]["radio"].as_array().unwrap().len(), 4);
    assert_eq!(result["wireless"]["radio"][0]["power"], 80);
}

#[test]
fn test_type_names_match_case_insensitively() {
    let doc = document(vec![radio()], vec![ssid("net1")]);

    for name in ["wireless", "WIRELESS", "Wireless"] {
        let (manager, backend) = echo_manager();
        assert!(manager.config_set(name, &doc), "set failed for {}", name);
        assert_eq!(backend.current().ssid[0].name.as_str(), "net1");
    }
}

#[test]
fn test_unknown_type_fails() {
    let (manager, backend) = echo_manager();
    let doc = document(vec![radio()], vec![ssid("net1")]);

    let err = manager.try_set("display", &doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert!(!manager.config_set("display", "{}"));
    assert_eq!(backend.apply_count(), 0);

    let mut out = JsonBuffer::with_capacity(4096);
    assert!(!manager.config_get("display", &mut out));
    assert!(out.is_empty());
}

#[test]
fn test_invalid_documents_never_reach_backend() {
    let (manager, backend) = echo_manager();

    let mut too_hot = radio();
    too_hot["power"] = json!(150);
    let mut extra = ssid("net1");
    extra["vlan"] = json!(10);

    let cases = vec![
        "not json".to_string(),
        document(vec![too_hot], vec![ssid("net1")]),
        document(vec![radio()], vec![extra]),
        document(vec![], vec![ssid("net1")]),
        document(vec![radio()], vec![ssid("")]),
        json!({ "wireless": { "radio": [radio()], "ssid": [ssid("a")], "mesh": {} } }).to_string(),
        json!({ "wireless": { "radio": [radio()], "ssid": [ssid("a")] }, "lan": {} }).to_string(),
    ];

    for doc in &cases {
        let err = manager.try_set("wireless", doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure, "document: {}", doc);
    }
    assert_eq!(backend.apply_count(), 0);
}

#[test]
fn test_buffer_too_small_leaves_buffer_empty() {
    let (manager, _backend) = echo_manager();
    assert!(manager.config_set("wireless", &document(vec![radio()], vec![ssid("net1")])));

    let mut out = JsonBuffer::with_capacity(4);
    let err = manager.try_get("wireless", &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodeFailure);
    assert!(err.is_buffer_too_small());
    assert!(out.is_empty());
    assert_eq!(out.as_str(), "");
}

#[test]
fn test_get_encodes_ssids_sparsely() {
    let mut seed = WirelessConfig::default();
    seed.ssid[0] = SsidConfig::named("home").unwrap();
    seed.ssid[2] = SsidConfig::named("guest").unwrap();
    let backend = Arc::new(MemoryBackend::with_initial(seed));
    let manager = ConfigManager::new(
        TypeRegistry::with_defaults(),
        SouthboundRegistry::for_backend(backend),
    );

    let mut out = JsonBuffer::with_capacity(4096);
    assert!(manager.config_get("wireless", &mut out));

    let result: Value = serde_json::from_str(out.as_str()).unwrap();
    let names: Vec<&str> = result["wireless"]["ssid"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["ssid"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["home", "guest"]);
    assert_eq!(result["wireless"]["radio"].as_array().unwrap().len(), 4);
}

#[test]
fn test_get_without_ssids_fails_revalidation() {
    let (manager, _backend) = echo_manager();
    let mut out = JsonBuffer::with_capacity(4096);

    let err = manager.try_get("wireless", &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReexportValidationFailure);
    assert!(out.is_empty());
}

#[test]
fn test_second_set_replaces_first() {
    let (manager, backend) = echo_manager();
    assert!(manager.config_set("wireless", &document(vec![radio(), radio()], vec![ssid("a"), ssid("b")])));
    assert!(manager.config_set("wireless", &document(vec![radio()], vec![ssid("c")])));

    let current = backend.current();
    assert_eq!(current.ssid[0].name.as_str(), "c");
    assert!(!current.ssid[1].is_populated());
    assert_eq!(current.radio[1], Default::default());
}

#[test]
fn test_encoder_emits_exactly_the_rule_names() {
    let encoded: Value = serde_json::from_str(&encode_wireless(&full_record()).unwrap()).unwrap();
    let wireless = encoded[WIRELESS_SCHEMA.root].as_object().unwrap();

    let mut sections: Vec<&str> = wireless.keys().map(String::as_str).collect();
    let mut expected: Vec<&str> = WIRELESS_SCHEMA.sections.iter().map(|s| s.name).collect();
    sections.sort_unstable();
    expected.sort_unstable();
    assert_eq!(sections, expected);

    for (section, rules) in [("radio", &RADIO_FIELDS), ("ssid", &SSID_FIELDS)] {
        for item in wireless[section].as_array().unwrap() {
            let mut keys: Vec<&str> = item.as_object().unwrap().keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, sorted_names(rules), "section {}", section);
        }
    }
}

#[test]
fn test_full_record_survives_encode_and_decode() {
    let original = full_record();
    let encoded = encode_wireless(&original).unwrap();
    WIRELESS_SCHEMA.validate(&encoded).unwrap();

    let mut decoded = WirelessConfig::default();
    decode_wireless(&encoded, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_free_functions_use_global_manager() {
    assert!(!devconf::config_set("display", "{}"));
    assert!(!devconf::config_set("", "{}"));

    let mut out = JsonBuffer::with_capacity(0);
    assert!(!devconf::config_get("wireless", &mut out));
}
