//! Owned file records
//!
//! A `file`-typed Value owns its File records: they are created when the
//! value is assigned and destroyed with it. Content travels base64-encoded
//! inside the record; `size` always reflects the decoded byte count.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use eav_core::{EavError, FileId, RawValue, Result};
use serde::{Deserialize, Serialize};

/// One file attached to a `file`-typed Value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique identifier
    pub id: FileId,
    /// File name as supplied by the client
    pub name: String,
    /// File extension, if known
    pub extension: Option<String>,
    /// MIME type, if known
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    /// Decoded content size in bytes
    pub size: Option<u64>,
    /// Base64-encoded content
    pub base64: Option<String>,
}

impl File {
    /// Create an empty file record with the given name
    pub fn new(name: &str) -> Self {
        Self {
            id: FileId::new(),
            name: name.to_string(),
            extension: None,
            mime_type: None,
            size: None,
            base64: None,
        }
    }

    /// Build a file record from a raw wire object
    ///
    /// Expects a map with a `name` and optionally `extension`, `mimeType`
    /// and `base64`. Returns None for any other shape, or when the base64
    /// content does not decode.
    pub fn from_raw(raw: &RawValue) -> Option<Self> {
        let map = raw.as_object()?;
        let name = map.get("name").and_then(|v| v.as_str())?;
        let mut file = File::new(name);
        file.extension = map
            .get("extension")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        file.mime_type = map
            .get("mimeType")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        if let Some(content) = map.get("base64").and_then(|v| v.as_str()) {
            let decoded = STANDARD.decode(content).ok()?;
            file.size = Some(decoded.len() as u64);
            file.base64 = Some(content.to_string());
        }
        Some(file)
    }

    /// Replace the content, re-encoding and updating `size`
    pub fn set_content(&mut self, bytes: &[u8]) {
        self.base64 = Some(STANDARD.encode(bytes));
        self.size = Some(bytes.len() as u64);
    }

    /// Decode the content, if any
    pub fn content(&self) -> Result<Option<Vec<u8>>> {
        match &self.base64 {
            None => Ok(None),
            Some(content) => STANDARD
                .decode(content)
                .map(Some)
                .map_err(|e| EavError::Serialization(format!("invalid base64 content: {e}"))),
        }
    }
}
