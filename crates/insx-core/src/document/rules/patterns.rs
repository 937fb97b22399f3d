//! Common regex patterns for insurance field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates (positional: no label is required)
    pub static ref DATE: Regex = Regex::new(
        r"\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}"
    ).unwrap();

    // Policy documents
    pub static ref POLICY_NUMBER: Regex = Regex::new(
        r"(?i)policy\s*(?:number|no|#)?[:\s]*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref POLICY_HOLDER: Regex = Regex::new(
        r"(?i)(?:policy\s*holder|insured|named\s*insured)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref PREMIUM_AMOUNT: Regex = Regex::new(
        r"(?i)(?:premium|total)[:\s]*\$?([\d,]+\.?\d*)"
    ).unwrap();

    // Claim documents
    pub static ref CLAIM_NUMBER: Regex = Regex::new(
        r"(?i)claim\s*(?:number|no|#)?[:\s]*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref DATE_OF_LOSS: Regex = Regex::new(
        r"(?i)(?:date\s*of\s*loss|loss\s*date|incident\s*date)[:\s]*(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})"
    ).unwrap();

    pub static ref CLAIMANT_NAME: Regex = Regex::new(
        r"(?i)(?:claimant|insured)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref CLAIM_AMOUNT: Regex = Regex::new(
        r"(?i)(?:claim\s*amount|amount|total)[:\s]*\$?([\d,]+\.?\d*)"
    ).unwrap();

    // Submissions and applications
    pub static ref APPLICATION_ID: Regex = Regex::new(
        r"(?i)(?:application|submission|quote)\s*(?:id|number|no|#)?[:\s]*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref APPLICANT_NAME: Regex = Regex::new(
        r"(?i)(?:applicant|proposed\s*insured|name)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref REQUESTED_COVERAGE: Regex = Regex::new(
        r"(?i)(?:coverage|type)[:\s]*([A-Za-z\s]+)"
    ).unwrap();
}
