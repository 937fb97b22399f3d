//! Rule-based field extractors for insurance documents.
//!
//! Every document type owns an ordered table of [`FieldRule`]s. Rules are
//! evaluated independently against the whole text; a rule that does not match
//! contributes nothing.

pub mod claim;
pub mod dates;
pub mod patterns;
pub mod policy;
pub mod raw;
pub mod submission;

pub use claim::CLAIM_RULES;
pub use policy::POLICY_RULES;
pub use raw::{RAW_TEXT_LIMIT, RawTextExtractor};
pub use submission::SUBMISSION_RULES;

use regex::Regex;
use tracing::trace;

use crate::models::document::{DocumentType, ExtractedField};

/// Longest value kept for free-text name fields, in characters.
pub const NAME_MAX_CHARS: usize = 50;

/// Trait for field extractors.
pub trait FieldExtractor: Send + Sync {
    /// The document type this extractor handles.
    fn document_type(&self) -> DocumentType;

    /// Extract fields from text, in rule order.
    fn extract(&self, text: &str) -> Vec<ExtractedField>;
}

/// How a rule finds its raw value.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// First capture group of the first match.
    Capture(&'static Regex),
    /// The n-th (0-based) date-like substring of the text.
    NthDate(usize),
}

/// How a raw match becomes the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    /// Value used exactly as matched.
    Verbatim,
    /// Surrounding whitespace removed.
    Trim,
    /// Trimmed, then cut to [`NAME_MAX_CHARS`] characters.
    Name,
    /// Prefixed with `$`.
    Currency,
}

impl ValueTransform {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Verbatim => raw.to_string(),
            Self::Trim => raw.trim().to_string(),
            Self::Name => raw.trim().chars().take(NAME_MAX_CHARS).collect(),
            Self::Currency => format!("${}", raw),
        }
    }
}

/// A single extraction rule: where to look, what to call it, how sure to be.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Field name reported on a match.
    pub field_name: &'static str,
    /// How the raw value is located.
    pub matcher: Matcher,
    /// Fixed confidence reported on a match.
    pub confidence: f64,
    /// How the raw value is cleaned up.
    pub transform: ValueTransform,
}

impl FieldRule {
    pub fn capture(
        field_name: &'static str,
        pattern: &'static Regex,
        confidence: f64,
        transform: ValueTransform,
    ) -> Self {
        Self {
            field_name,
            matcher: Matcher::Capture(pattern),
            confidence,
            transform,
        }
    }

    pub fn nth_date(field_name: &'static str, index: usize, confidence: f64) -> Self {
        Self {
            field_name,
            matcher: Matcher::NthDate(index),
            confidence,
            transform: ValueTransform::Verbatim,
        }
    }

    /// Apply the rule to text.
    pub fn apply(&self, text: &str) -> Option<ExtractedField> {
        let raw = match self.matcher {
            Matcher::Capture(pattern) => pattern.captures(text)?.get(1)?.as_str(),
            Matcher::NthDate(index) => dates::nth_date(text, index)?,
        };

        Some(ExtractedField::new(
            self.field_name,
            self.transform.apply(raw),
            self.confidence,
        ))
    }
}

/// Ordered rule table for one document type.
#[derive(Debug, Clone)]
pub struct RuleSet {
    document_type: DocumentType,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(document_type: DocumentType, rules: Vec<FieldRule>) -> Self {
        Self {
            document_type,
            rules,
        }
    }
}

impl FieldExtractor for RuleSet {
    fn document_type(&self) -> DocumentType {
        self.document_type
    }

    fn extract(&self, text: &str) -> Vec<ExtractedField> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let field = rule.apply(text);
                trace!(
                    "{} rule '{}': {}",
                    self.document_type,
                    rule.field_name,
                    if field.is_some() { "hit" } else { "miss" }
                );
                field
            })
            .collect()
    }
}

/// The extractor responsible for a document type.
pub fn extractor_for(document_type: DocumentType) -> &'static dyn FieldExtractor {
    match document_type {
        DocumentType::Policy => &*POLICY_RULES,
        DocumentType::Claim => &*CLAIM_RULES,
        DocumentType::Submission => &*SUBMISSION_RULES,
        DocumentType::Unknown => &RawTextExtractor,
    }
}
