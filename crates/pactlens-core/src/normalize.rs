//! Ingestion stage: whitespace and quote normalisation.

use crate::error::CoreError;
use crate::model::NormalizedDocument;

/// Fixed confidence reported by the ingestion stage.
pub const INGESTION_CONFIDENCE: f32 = 0.95;

/// Language reported for every document. Detection is stubbed.
pub const DETECTED_LANGUAGE: &str = "English";

/// Normalise raw document text.
///
/// Collapses every run of whitespace to a single space, trims both ends, and
/// maps typographic quotes to their ASCII equivalents. Empty or
/// whitespace-only input is rejected with [`CoreError::EmptyInput`].
pub fn normalize(raw: &str) -> Result<NormalizedDocument, CoreError> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let text: String = collapsed.chars().map(straighten_quote).collect();
    let word_count = text.split_whitespace().count();

    Ok(NormalizedDocument {
        text,
        word_count,
        detected_language: DETECTED_LANGUAGE.to_string(),
        confidence: INGESTION_CONFIDENCE,
    })
}

fn straighten_quote(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
        other => other,
    }
}
