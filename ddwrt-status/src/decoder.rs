//! Decoder for the brace-delimited pseudo-JSON served by `*.live.asp` pages.
//!
//! A status page looks like:
//!
//! ```text
//! {lan_mac::00:11:22:33:44:55}
//! {lan_ip::192.168.1.1}
//! {wl_quality::87%}
//! ```
//!
//! Braces do not nest, keys are unquoted, values may carry HTML. This is
//! not JSON and is never handed to a JSON parser.

use tracing::debug;

use crate::store::{FieldStore, Upsert};

/// Separator between key and value inside a record.
pub const SEPARATOR: &str = "::";

/// Counts from one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Completed `{...}` records found in the blob.
    pub records: usize,
    /// Fields newly added to the store.
    pub inserted: usize,
    /// Existing fields overwritten.
    pub updated: usize,
    /// New fields rejected because their value carried markup.
    pub dropped: usize,
    /// Records without a usable `key::value` payload.
    pub skipped: usize,
}

impl DecodeSummary {
    /// Fields that reached the store.
    pub fn stored(&self) -> usize {
        self.inserted + self.updated
    }

    /// True when `blob` has content but not a single record was completed.
    pub fn is_malformed(&self, blob: &str) -> bool {
        self.records == 0 && !blob.trim().is_empty()
    }
}

/// Extract record payloads from a blob.
///
/// Content outside `{`..`}` is ignored. An opening brace inside a record
/// restarts it, so unterminated content is discarded, as is anything after
/// the final closing brace.
pub fn scan_records(blob: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in blob.char_indices() {
        match (c, start) {
            ('{', _) => start = Some(i + 1),
            ('}', Some(s)) => {
                records.push(&blob[s..i]);
                start = None;
            }
            _ => {}
        }
    }

    records
}

/// Split a record payload on the first `::`.
///
/// Returns `None` when there is no separator or the key is empty.
pub fn split_record(payload: &str) -> Option<(&str, &str)> {
    payload
        .split_once(SEPARATOR)
        .filter(|(key, _)| !key.is_empty())
}

/// Decode a status page into `store`.
pub fn decode(blob: &str, store: &mut FieldStore) -> DecodeSummary {
    let records = scan_records(blob);
    let mut summary = DecodeSummary {
        records: records.len(),
        ..Default::default()
    };

    for payload in records {
        let Some((key, value)) = split_record(payload) else {
            debug!(record = %payload, "Skipping record without key::value");
            summary.skipped += 1;
            continue;
        };

        match store.upsert(key, value) {
            Upsert::Inserted => summary.inserted += 1,
            Upsert::Updated => summary.updated += 1,
            Upsert::Dropped => {
                debug!(field = %key, "Dropping new field carrying markup");
                summary.dropped += 1;
            }
        }
    }

    summary
}
