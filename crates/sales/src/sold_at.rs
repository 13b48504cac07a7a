//! `sold_at` encoding.
//!
//! Stored as RFC 3339 UTC with a fixed microsecond fraction, so the lexical
//! order of the column equals chronological order. The human-readable form is
//! only produced for display.

use chrono::{DateTime, SecondsFormat, Utc};

use vendo_core::DomainError;

const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn encode_sold_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_sold_at(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::validation(format!("sold_at {raw:?}: {e}")))
}

pub fn display_sold_at(at: DateTime<Utc>) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}
