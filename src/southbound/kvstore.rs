//! Local key-value store backend
//!
//! Persists the wireless configuration as `section.slot.option=value` lines,
//! one option per line:
//!
//! ```text
//! wireless.radio0.power=80
//! wireless.ssid0.ssid=home
//! wireless.ssid0.hide=0
//! ```
//!
//! Keys outside the `wireless.` section are preserved untouched. Booleans
//! are stored as `0`/`1`; backslashes, newlines and carriage returns in
//! values are escaped.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info};

use crate::model::{BoundedString, RadioConfig, SsidConfig, WirelessConfig};
use super::{Backend, BackendError};

const SECTION: &str = "wireless";

/// File-backed key-value store backend
#[derive(Debug)]
pub struct KvStoreBackend {
    path: PathBuf,
    // serialises read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl KvStoreBackend {
    /// Create a backend storing its data at `path`
    ///
    /// The file is created on the first apply.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, BackendError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("[kvstore] {} does not exist yet", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = BTreeMap::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                BackendError::Store(format!("{}:{}: expected key=value", self.path.display(), number + 1))
            })?;
            entries.insert(key.trim().to_string(), unescape(value));
        }
        Ok(entries)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let mut content = String::new();
        for (key, value) in entries {
            content.push_str(key);
            content.push('=');
            content.push_str(&escape(value));
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // write-then-rename so a crash never leaves a half-written store
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Backend for KvStoreBackend {
    fn name(&self) -> &'static str {
        "kvstore"
    }

    fn set_wireless_config(&self, cfg: &WirelessConfig) -> Result<(), BackendError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load()?;
        let prefix = format!("{}.", SECTION);
        entries.retain(|key, _| !key.starts_with(&prefix));

        for (i, radio) in cfg.radio.iter().enumerate() {
            for (option, value) in radio_options(radio) {
                entries.insert(format!("{}.radio{}.{}", SECTION, i, option), value);
            }
        }
        for (i, ssid) in cfg.ssid.iter().enumerate().filter(|(_, s)| s.is_populated()) {
            for (option, value) in ssid_options(ssid) {
                entries.insert(format!("{}.ssid{}.{}", SECTION, i, option), value);
            }
        }

        self.save(&entries)?;
        info!(
            "[kvstore] set_wireless_config: wrote {} ssid(s) to {}",
            cfg.populated_ssids().count(),
            self.path.display()
        );
        Ok(())
    }

    fn get_wireless_config(&self, cfg: &mut WirelessConfig) -> Result<(), BackendError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let entries = self.load()?;
        let slot = |kind: &str, i: usize| SlotReader { entries: &entries, prefix: format!("{}.{}{}.", SECTION, kind, i) };

        for (i, radio) in cfg.radio.iter_mut().enumerate() {
            let r = slot("radio", i);
            *radio = RadioConfig {
                power: r.integer("power"),
                channel2g: r.integer("channel2g"),
                channel5g: r.integer("channel5g"),
                bandwidth2g: r.integer("bandwidth2g"),
                bandwidth5g: r.integer("bandwidth5g"),
                dfs: r.flag("dfs"),
                atf: r.flag("atf"),
                bandsteering: r.flag("bandsteering"),
                zerowait: r.flag("zerowait"),
            };
        }

        for (i, ssid) in cfg.ssid.iter_mut().enumerate() {
            let s = slot("ssid", i);
            *ssid = SsidConfig {
                name: s.text("ssid"),
                hide: s.flag("hide"),
                security: s.integer("security"),
                password: s.text("password"),
                password_onscreen: s.flag("password_onscreen"),
                enable2g: s.flag("enable2g"),
                enable5g: s.flag("enable5g"),
                isolation: s.flag("isolation"),
                hopping: s.flag("hopping"),
            };
        }

        debug!("[kvstore] get_wireless_config: {} ssid(s) loaded", cfg.populated_ssids().count());
        Ok(())
    }
}

struct SlotReader<'a> {
    entries: &'a BTreeMap<String, String>,
    prefix: String,
}

impl SlotReader<'_> {
    fn get(&self, option: &str) -> Option<&str> {
        self.entries.get(&format!("{}{}", self.prefix, option)).map(String::as_str)
    }

    fn integer<T: std::str::FromStr + Default>(&self, option: &str) -> T {
        self.get(option).and_then(|v| v.trim().parse().ok()).unwrap_or_default()
    }

    fn flag(&self, option: &str) -> bool {
        matches!(self.get(option), Some("1") | Some("true"))
    }

    fn text<const N: usize>(&self, option: &str) -> BoundedString<N> {
        self.get(option).map(|v| BoundedString::truncating(v).0).unwrap_or_default()
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

fn radio_options(r: &RadioConfig) -> [(&'static str, String); 9] {
    [
        ("power", r.power.to_string()),
        ("channel2g", r.channel2g.to_string()),
        ("channel5g", r.channel5g.to_string()),
        ("bandwidth2g", r.bandwidth2g.to_string()),
        ("bandwidth5g", r.bandwidth5g.to_string()),
        ("dfs", flag(r.dfs)),
        ("atf", flag(r.atf)),
        ("bandsteering", flag(r.bandsteering)),
        ("zerowait", flag(r.zerowait)),
    ]
}

fn ssid_options(s: &SsidConfig) -> [(&'static str, String); 9] {
    [
        ("ssid", s.name.to_string()),
        ("hide", flag(s.hide)),
        ("security", s.security.to_string()),
        ("password", s.password.to_string()),
        ("password_onscreen", flag(s.password_onscreen)),
        ("enable2g", flag(s.enable2g)),
        ("enable5g", flag(s.enable5g)),
        ("isolation", flag(s.isolation)),
        ("hopping", flag(s.hopping)),
    ]
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
