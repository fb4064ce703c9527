//! Record name and property extraction.
//!
//! A property block is a header line `> <KEY>` (anything after the closing `>` is ignored)
//! followed by value lines up to the next header or the record delimiter.

use crate::error::{GrowError, Result};
use crate::utils::config::{PROPERTY_MARKER, RECORD_DELIMITER};

/// First line of the record, trimmed. Not truncated.
pub fn record_name(record: &str) -> &str {
    record.lines().next().unwrap_or("").trim()
}

/// Raw value of property `key`, trimmed. `None` when the record has no such block.
pub fn record_property<'a>(record: &'a str, key: &str) -> Option<&'a str> {
    // first piece is the molblock
    for block in record.split(PROPERTY_MARKER).skip(1) {
        let (header, body) = block.split_once('\n').unwrap_or((block, ""));
        let Some((name, _)) = header.split_once('>') else {
            continue;
        };
        if name.trim() != key {
            continue;
        }
        let body = match body.find(RECORD_DELIMITER) {
            Some(end) => &body[..end],
            None => body,
        };
        return Some(body.trim());
    }
    None
}

/// Property `key` converted with `cast`. A value `cast` rejects is a [`GrowError::PropertyCast`];
/// an absent key is `Ok(None)`.
pub fn record_property_as<T, F>(record: &str, key: &str, cast: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<T>,
{
    match record_property(record, key) {
        None => Ok(None),
        Some(raw) => cast(raw).map(Some).ok_or_else(|| GrowError::PropertyCast {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Like [`record_property_as`] but absence is an error too.
pub fn required_property_as<T, F>(record: &str, key: &str, cast: F) -> Result<T>
where
    F: Fn(&str) -> Option<T>,
{
    record_property_as(record, key, cast)?.ok_or_else(|| GrowError::MissingProperty {
        key: key.to_string(),
        record: record_name(record).to_string(),
    })
}

/// Float caster for scores: finite decimal literals only (`nan`, `inf` and `n/a` are rejected).
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
