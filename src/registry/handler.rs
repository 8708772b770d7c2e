//! Per-type handler capabilities
//!
//! A handler bundles the validator, decoder and encoder of one
//! configuration type behind a trait object.

use std::fmt::Debug;

use crate::codec::{decode_wireless, encode_wireless_into, CodecError, JsonBuffer};
use crate::model::{ConfigRecord, WirelessConfig};
use crate::schema::{DocumentSchema, ValidationError, WIRELESS_SCHEMA};

/// Validator, decoder and encoder of one configuration type
pub trait ConfigHandler: Send + Sync + Debug {
    /// Document rules of this type
    fn schema(&self) -> &DocumentSchema;

    /// Fresh zero-valued canonical record
    fn new_record(&self) -> ConfigRecord;

    /// Check a document against the type's rules
    fn validate(&self, document: &str) -> Result<(), ValidationError> {
        self.schema().validate(document)
    }

    /// Overwrite `record` from a document
    fn decode(&self, document: &str, record: &mut ConfigRecord) -> Result<(), CodecError>;

    /// Serialize `record` into `out`
    fn encode(&self, record: &ConfigRecord, out: &mut JsonBuffer) -> Result<(), CodecError>;
}

/// Handler for the `wireless` type
#[derive(Debug, Default, Clone, Copy)]
pub struct WirelessHandler;

impl ConfigHandler for WirelessHandler {
    fn schema(&self) -> &DocumentSchema {
        &WIRELESS_SCHEMA
    }

    fn new_record(&self) -> ConfigRecord {
        ConfigRecord::Wireless(WirelessConfig::default())
    }

    fn decode(&self, document: &str, record: &mut ConfigRecord) -> Result<(), CodecError> {
        let found = record.type_name();
        let cfg = record.as_wireless_mut().ok_or(CodecError::RecordMismatch {
            expected: "wireless",
            found,
        })?;
        decode_wireless(document, cfg)
    }

    fn encode(&self, record: &ConfigRecord, out: &mut JsonBuffer) -> Result<(), CodecError> {
        let cfg = record.as_wireless().ok_or(CodecError::RecordMismatch {
            expected: "wireless",
            found: record.type_name(),
        })?;
        encode_wireless_into(cfg, out)
    }
}
