//! Remote configuration service backend
//!
//! Talks JSON over HTTP to a WLAN settings service. Only SSID settings are
//! exchanged; the service uses `password-onscreen` where the northbound
//! document says `password_onscreen`.

use std::fmt;
use std::time::Duration;

use log::{debug, error, info};
use serde::Serialize;
use serde_json::Value;

use crate::codec::fields;
use crate::model::{SsidConfig, WirelessConfig};
use super::{Backend, BackendCapabilities, BackendError};

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    fn carries_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A request to the configuration service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body, sent only for POST, PUT and PATCH
    pub body: Option<String>,
}

/// Status and body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP capability used by `RestBackend`
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and wait for the full response
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BackendError>;
}

/// `HttpTransport` over `reqwest`'s blocking client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BackendError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        debug!("ReqwestTransport: {} {}", method, request.url);

        let mut builder = self
            .client
            .request(method, &request.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = request.body.as_ref().filter(|_| request.method.carries_body()) {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| {
            error!("ReqwestTransport: request to {} failed: {}", request.url, e);
            BackendError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| BackendError::Transport(e.to_string()))?;
        debug!("ReqwestTransport: HTTP {} ({} bytes)", status, body.len());

        Ok(HttpResponse { status, body })
    }
}

/// SSID entry in the service's dialect
#[derive(Serialize)]
struct SsidEntry<'a> {
    ssid: &'a str,
    hide: bool,
    security: u32,
    password: &'a str,
    #[serde(rename = "password-onscreen")]
    password_onscreen: bool,
    enable2g: bool,
    enable5g: bool,
    isolation: bool,
    hopping: bool,
}

impl<'a> From<&'a SsidConfig> for SsidEntry<'a> {
    fn from(s: &'a SsidConfig) -> Self {
        Self {
            ssid: s.name.as_str(),
            hide: s.hide,
            security: s.security,
            password: s.password.as_str(),
            password_onscreen: s.password_onscreen,
            enable2g: s.enable2g,
            enable5g: s.enable5g,
            isolation: s.isolation,
            hopping: s.hopping,
        }
    }
}

#[derive(Serialize)]
struct SsidPatch<'a> {
    ssid: Vec<SsidEntry<'a>>,
}

/// Backend for the remote WLAN settings service
pub struct RestBackend {
    base_url: String,
    max_response_bytes: usize,
    transport: Box<dyn HttpTransport>,
}

impl RestBackend {
    /// Create a backend using `reqwest`
    pub fn new(base_url: &str, timeout: Duration, max_response_bytes: usize) -> Result<Self, BackendError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(base_url, max_response_bytes, Box::new(transport)))
    }

    /// Create a backend over any transport
    pub fn with_transport(base_url: &str, max_response_bytes: usize, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.to_string(),
            max_response_bytes,
            transport,
        }
    }

    fn expect_ok(response: &HttpResponse) -> Result<(), BackendError> {
        if response.status != 200 {
            error!("RestBackend: service answered HTTP {}", response.status);
            return Err(BackendError::Status(response.status));
        }
        Ok(())
    }
}

impl fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url)
            .field("max_response_bytes", &self.max_response_bytes)
            .finish()
    }
}

impl Backend for RestBackend {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::all()
    }

    fn set_wireless_config(&self, cfg: &WirelessConfig) -> Result<(), BackendError> {
        let patch = SsidPatch {
            ssid: cfg.populated_ssids().map(SsidEntry::from).collect(),
        };
        let body = serde_json::to_string(&patch)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        debug!("RestBackend: PATCH {} with {} ssid(s)", self.base_url, patch.ssid.len());

        let response = self.transport.send(&HttpRequest {
            method: HttpMethod::Patch,
            url: self.base_url.clone(),
            body: Some(body),
        })?;
        Self::expect_ok(&response)?;

        info!("RestBackend: wireless settings patched");
        Ok(())
    }

    fn get_wireless_config(&self, cfg: &mut WirelessConfig) -> Result<(), BackendError> {
        let response = self.transport.send(&HttpRequest {
            method: HttpMethod::Get,
            url: self.base_url.clone(),
            body: None,
        })?;
        Self::expect_ok(&response)?;

        if response.body.len() > self.max_response_bytes {
            return Err(BackendError::ResponseTooLarge {
                size: response.body.len(),
                limit: self.max_response_bytes,
            });
        }

        let json: Value = serde_json::from_str(&response.body).map_err(|e| {
            error!("RestBackend: failed to parse JSON response: {}", e);
            BackendError::InvalidResponse(e.to_string())
        })?;

        match json.get("ssid").and_then(Value::as_array) {
            Some(items) => {
                debug!("RestBackend: found ssid array with {} elements", items.len());
                for (i, slot) in cfg.ssid.iter_mut().enumerate() {
                    *slot = match items.get(i).and_then(Value::as_object) {
                        Some(obj) => {
                            let path = format!("ssid[{}]", i);
                            SsidConfig {
                                name: fields::text(obj, "ssid", &path),
                                hide: fields::boolean(obj, "hide"),
                                security: fields::integer(obj, "security"),
                                password: fields::text(obj, "password", &path),
                                password_onscreen: fields::boolean(obj, "password-onscreen"),
                                enable2g: fields::boolean(obj, "enable2g"),
                                enable5g: fields::boolean(obj, "enable5g"),
                                isolation: fields::boolean(obj, "isolation"),
                                hopping: fields::boolean(obj, "hopping"),
                            }
                        }
                        None => SsidConfig::default(),
                    };
                }
            }
            None => {
                debug!("RestBackend: 'ssid' array not found, clearing entries");
                cfg.ssid.iter_mut().for_each(|slot| *slot = SsidConfig::default());
            }
        }

        Ok(())
    }
}
