//! Build [`ParsedHit`]s from records.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::utils::config::{HIT_FILE_TYPE, HIT_NAME_MAX_CHARS, SCORE_PROPERTY};
use crate::{EnsembleMember, ParsedHit};

use super::properties::{parse_score, record_name, required_property_as};
use super::splitter::{normalize_line_endings, split_records};

/// First `max` characters of `s` (characters, not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Parse one record. `Score` is required; with more than one ensemble member each member's
/// score (property key = upper-cased member name) is required as well.
pub fn build_hit(record: String, ensemble: &[EnsembleMember]) -> Result<ParsedHit> {
    let name = truncate_chars(record_name(&record), HIT_NAME_MAX_CHARS).to_string();
    let score = required_property_as(&record, SCORE_PROPERTY, parse_score)?;
    let mut ensemble_scores = BTreeMap::new();
    if ensemble.len() > 1 {
        for member in ensemble {
            let key = member.name.to_uppercase();
            let member_score = required_property_as(&record, &key, parse_score)?;
            ensemble_scores.insert(member.name.clone(), member_score);
        }
    }
    Ok(ParsedHit {
        name,
        score,
        ensemble_scores,
        file_string: record,
        file_type: HIT_FILE_TYPE.to_string(),
    })
}

/// Parse every record of one result file. Fails on the first bad record so a file is
/// all-or-nothing. CRLF files are read as LF.
pub fn parse_hits(text: &str, ensemble: &[EnsembleMember]) -> Result<Vec<ParsedHit>> {
    let text = normalize_line_endings(text);
    split_records(&text)
        .map(|record| build_hit(record, ensemble))
        .collect()
}
