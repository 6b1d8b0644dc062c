//! Versioned snapshot documents written into storage slots.
//!
//! A slot holds an envelope `{ version, saved_at, lines }` rather than the
//! bare line array, so future field additions do not silently corrupt stored
//! history. Hydration is deliberately forgiving:
//!
//! - missing or unknown envelope fields fall back to defaults,
//! - the legacy bare-array form (a JSON array of flat line objects) is still
//!   accepted,
//! - anything unreadable decodes to an empty sequence.
//!
//! A store must never fail to initialize because of what it finds in its
//! slot.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Envelope<L> {
    #[serde(default = "default_version")]
    #[allow(dead_code)]
    version: u32,
    #[serde(default)]
    #[allow(dead_code)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default = "Vec::new")]
    lines: Vec<L>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, L> {
    version: u32,
    saved_at: DateTime<Utc>,
    lines: &'a [L],
}

const fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Either the current envelope or the legacy bare-array form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDocument<L> {
    Envelope(Envelope<L>),
    Legacy(Vec<L>),
}

/// Encode lines into the current envelope format.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn encode<L: Serialize>(lines: &[L]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        lines,
    })
}

/// Decode the raw contents of a slot into a line sequence.
///
/// Fails soft: an absent slot or unreadable document yields an empty
/// sequence, never an error.
pub fn decode<L: DeserializeOwned>(slot: &str, raw: Option<&str>) -> Vec<L> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<StoredDocument<L>>(raw) {
        Ok(StoredDocument::Envelope(envelope)) => envelope.lines,
        Ok(StoredDocument::Legacy(lines)) => lines,
        Err(e) => {
            tracing::warn!(slot, error = %e, "discarding unreadable store document");
            Vec::new()
        }
    }
}
