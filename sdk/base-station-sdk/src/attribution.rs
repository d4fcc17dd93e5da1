//! Builder attribution suffix.
//!
//! Layout: `[identifier bytes][length(1)][schema(1)][marker(16)]`. Reading
//! from the end, an indexer finds the marker, then the schema, then the
//! length telling it how far back the identifier starts.

use crate::core::constants::{ATTRIBUTION_MARKER, ATTRIBUTION_SCHEMA_VERSION};
use crate::error::{Result, StationError};
use alloy_primitives::Bytes;

/// Encode an integrator identifier into its attribution suffix.
///
/// Identifiers are ASCII, so the length byte is both the character count
/// and the number of identifier bytes an indexer has to step back over.
pub fn encode(identifier: &str) -> Result<Vec<u8>> {
    if !identifier.is_ascii() {
        return Err(StationError::Encoding(format!(
            "builder identifier {:?} must be ASCII",
            identifier
        )));
    }
    let raw = identifier.as_bytes();
    let len = u8::try_from(raw.len()).map_err(|_| {
        StationError::Encoding(format!(
            "builder identifier is {} characters, maximum is 255",
            raw.len()
        ))
    })?;

    let mut out = Vec::with_capacity(raw.len() + 2 + ATTRIBUTION_MARKER.len());
    out.extend_from_slice(raw);
    out.push(len);
    out.push(ATTRIBUTION_SCHEMA_VERSION);
    out.extend_from_slice(&ATTRIBUTION_MARKER);
    Ok(out)
}

/// Suffix computed once per session and shared by every dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionSuffix {
    bytes: Bytes,
}

impl AttributionSuffix {
    pub fn new(identifier: &str) -> Result<Self> {
        Ok(Self {
            bytes: Bytes::from(encode(identifier)?),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
