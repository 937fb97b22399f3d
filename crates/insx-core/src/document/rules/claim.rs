//! Field rules for claim documents.

use lazy_static::lazy_static;

use super::patterns::{CLAIM_AMOUNT, CLAIM_NUMBER, CLAIMANT_NAME, DATE_OF_LOSS};
use super::{FieldRule, RuleSet, ValueTransform};
use crate::models::document::DocumentType;

lazy_static! {
    /// Number, date of loss, claimant, amount.
    pub static ref CLAIM_RULES: RuleSet = RuleSet::new(
        DocumentType::Claim,
        vec![
            FieldRule::capture("Claim Number", &CLAIM_NUMBER, 0.90, ValueTransform::Trim),
            FieldRule::capture("Date of Loss", &DATE_OF_LOSS, 0.90, ValueTransform::Verbatim),
            FieldRule::capture("Claimant Name", &CLAIMANT_NAME, 0.85, ValueTransform::Name),
            FieldRule::capture("Claim Amount", &CLAIM_AMOUNT, 0.85, ValueTransform::Currency),
        ],
    );
}
