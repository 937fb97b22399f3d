//! Field rules for applications and new business submissions.

use lazy_static::lazy_static;

use super::patterns::{APPLICANT_NAME, APPLICATION_ID, REQUESTED_COVERAGE};
use super::{FieldRule, RuleSet, ValueTransform};
use crate::models::document::DocumentType;

lazy_static! {
    /// Application id, applicant, application date, requested coverage.
    pub static ref SUBMISSION_RULES: RuleSet = RuleSet::new(
        DocumentType::Submission,
        vec![
            FieldRule::capture("Application ID", &APPLICATION_ID, 0.90, ValueTransform::Trim),
            FieldRule::capture("Applicant Name", &APPLICANT_NAME, 0.85, ValueTransform::Name),
            FieldRule::nth_date("Application Date", 0, 0.80),
            FieldRule::capture("Requested Coverage", &REQUESTED_COVERAGE, 0.75, ValueTransform::Name),
        ],
    );
}
