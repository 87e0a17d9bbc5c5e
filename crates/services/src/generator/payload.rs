use serde_json::Value;
use vocab_core::model::WordRecord;

use crate::error::AttemptError;

/// Slice `raw` from its first `{` to its last `}` inclusive.
///
/// Prose or code fences wrapped around the object are discarded.
#[must_use]
pub fn extract_payload(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Extract, decode and validate one model response.
///
/// # Errors
///
/// `NoPayload` when no braces are found, `InvalidJson` when the slice does not
/// decode, `Record` when required fields are missing.
pub fn parse_record(raw: &str, english_word: &str) -> Result<WordRecord, AttemptError> {
    let payload = extract_payload(raw).ok_or(AttemptError::NoPayload)?;
    let value: Value = serde_json::from_str(payload).map_err(AttemptError::InvalidJson)?;
    Ok(WordRecord::from_payload(value, english_word)?)
}
