//! Overall confidence scoring for rule-extracted fields.

use crate::models::document::ExtractedField;

/// Score reported when no rule matched.
pub const NO_FIELDS_CONFIDENCE: f64 = 0.5;

/// Bonus per extracted field.
pub const PER_FIELD_BONUS: f64 = 0.02;

/// Upper bound on the field-count bonus.
pub const MAX_FIELD_BONUS: f64 = 0.10;

/// Overall confidence never exceeds this.
pub const CONFIDENCE_CEILING: f64 = 0.99;

/// Combine per-field confidences into one overall score.
///
/// Mean field confidence plus a small bonus per field (capped), rounded to two
/// decimals and capped at [`CONFIDENCE_CEILING`].
pub fn aggregate_confidence(fields: &[ExtractedField]) -> f64 {
    if fields.is_empty() {
        return NO_FIELDS_CONFIDENCE;
    }

    let count = fields.len() as f64;
    let average = fields.iter().map(|f| f.confidence).sum::<f64>() / count;
    let bonus = (count * PER_FIELD_BONUS).min(MAX_FIELD_BONUS);

    round2(average + bonus).min(CONFIDENCE_CEILING)
}

/// Round half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
