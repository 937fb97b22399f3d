//! Extraction result models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification target for an insurance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Policy, declarations page or certificate of insurance.
    Policy,
    /// Claim form, loss notice or incident report.
    Claim,
    /// Application, quote request or new business submission.
    Submission,
    /// Nothing in the text or filename pointed at a type.
    Unknown,
}

impl DocumentType {
    /// The classifiable types, in tie-break priority order.
    pub const TYPED: [DocumentType; 3] = [Self::Policy, Self::Claim, Self::Submission];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Claim => "claim",
            Self::Submission => "submission",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "policy" => Ok(Self::Policy),
            "claim" => Ok(Self::Claim),
            "submission" => Ok(Self::Submission),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

/// A named, valued, confidence-scored datum pulled from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Display name, e.g. "Policy Number".
    pub field_name: String,
    /// Extracted value as it should be shown.
    pub value: String,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f64,
}

impl ExtractedField {
    pub fn new(field_name: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
            confidence,
        }
    }
}

/// Outcome of a single extraction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Name of the uploaded file.
    pub filename: String,

    /// Detected document type.
    pub document_type: DocumentType,

    /// Overall confidence (0.0 - 0.99).
    pub confidence: f64,

    /// Fields in rule-evaluation order.
    pub extracted_fields: Vec<ExtractedField>,

    /// When the result was assembled.
    pub processed_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// Look up a field by name.
    pub fn field(&self, field_name: &str) -> Option<&ExtractedField> {
        self.extracted_fields
            .iter()
            .find(|f| f.field_name == field_name)
    }

    /// Value of a field by name.
    pub fn value(&self, field_name: &str) -> Option<&str> {
        self.field(field_name).map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_type_round_trips_through_str() {
        for doc_type in DocumentType::TYPED {
            assert_eq!(doc_type.as_str().parse::<DocumentType>(), Ok(doc_type));
        }
        assert!("invoice".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_result_serializes_response_contract() {
        let result = ExtractionResult {
            filename: "policy.pdf".to_string(),
            document_type: DocumentType::Policy,
            confidence: 0.93,
            extracted_fields: vec![ExtractedField::new("Policy Number", "POL-1", 0.9)],
            processed_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["filename"], "policy.pdf");
        assert_eq!(json["document_type"], "policy");
        assert_eq!(json["confidence"], 0.93);
        assert_eq!(json["extracted_fields"][0]["field_name"], "Policy Number");
        assert_eq!(json["extracted_fields"][0]["value"], "POL-1");
        assert_eq!(json["processed_at"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_field_lookup() {
        let result = ExtractionResult {
            filename: "claim.png".to_string(),
            document_type: DocumentType::Claim,
            confidence: 0.5,
            extracted_fields: vec![ExtractedField::new("Claim Number", "CLM-7", 0.9)],
            processed_at: Utc::now(),
        };

        assert_eq!(result.value("Claim Number"), Some("CLM-7"));
        assert!(result.field("Claim Amount").is_none());
    }
}
