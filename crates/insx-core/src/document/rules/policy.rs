//! Field rules for policy documents.

use lazy_static::lazy_static;

use super::patterns::{POLICY_HOLDER, POLICY_NUMBER, PREMIUM_AMOUNT};
use super::{FieldRule, RuleSet, ValueTransform};
use crate::models::document::DocumentType;

lazy_static! {
    /// Number, holder, effective date, expiration date, premium.
    pub static ref POLICY_RULES: RuleSet = RuleSet::new(
        DocumentType::Policy,
        vec![
            FieldRule::capture("Policy Number", &POLICY_NUMBER, 0.90, ValueTransform::Trim),
            FieldRule::capture("Policy Holder", &POLICY_HOLDER, 0.85, ValueTransform::Name),
            FieldRule::nth_date("Effective Date", 0, 0.80),
            FieldRule::nth_date("Expiration Date", 1, 0.80),
            FieldRule::capture("Premium Amount", &PREMIUM_AMOUNT, 0.85, ValueTransform::Currency),
        ],
    );
}
