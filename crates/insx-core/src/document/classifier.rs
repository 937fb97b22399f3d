//! Keyword-based document type classification.

use tracing::debug;

use crate::models::document::DocumentType;

/// Keyword and filename-hint lists for one document type.
#[derive(Debug, Clone, Copy)]
pub struct CategoryProfile {
    /// Type this profile votes for.
    pub document_type: DocumentType,
    /// Phrases counted once each when present in the lowercased text.
    pub keywords: &'static [&'static str],
    /// Filename substrings worth a single bonus.
    pub filename_hints: &'static [&'static str],
}

/// Bonus added once per type when any of its filename hints matches.
pub const FILENAME_BONUS: usize = 2;

/// Profiles in tie-break priority order (policy > claim > submission).
pub const PROFILES: [CategoryProfile; 3] = [
    CategoryProfile {
        document_type: DocumentType::Policy,
        keywords: &[
            "policy number",
            "policy no",
            "policyholder",
            "policy holder",
            "coverage period",
            "premium",
            "declarations",
            "insured",
            "effective date",
            "expiration date",
            "certificate of insurance",
        ],
        filename_hints: &["policy", "certificate", "coverage"],
    },
    CategoryProfile {
        document_type: DocumentType::Claim,
        keywords: &[
            "claim number",
            "claim no",
            "date of loss",
            "claimant",
            "incident report",
            "accident report",
            "claim form",
            "loss description",
            "damage",
            "adjuster",
        ],
        filename_hints: &["claim", "loss", "incident"],
    },
    CategoryProfile {
        document_type: DocumentType::Submission,
        keywords: &[
            "application",
            "submission",
            "quote request",
            "applicant",
            "requested coverage",
            "proposed insured",
            "new business",
        ],
        filename_hints: &["submission", "application", "quote"],
    },
];

impl CategoryProfile {
    fn keyword_score(&self, text_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|kw| text_lower.contains(*kw))
            .count()
    }

    fn matches_filename(&self, filename_lower: &str) -> bool {
        self.filename_hints
            .iter()
            .any(|hint| filename_lower.contains(hint))
    }

    fn score(&self, text_lower: &str, filename_lower: &str) -> usize {
        let bonus = if self.matches_filename(filename_lower) {
            FILENAME_BONUS
        } else {
            0
        };
        self.keyword_score(text_lower) + bonus
    }
}

/// Per-type scores for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordScores {
    pub policy: usize,
    pub claim: usize,
    pub submission: usize,
}

impl KeywordScores {
    pub fn get(&self, doc_type: DocumentType) -> usize {
        match doc_type {
            DocumentType::Policy => self.policy,
            DocumentType::Claim => self.claim,
            DocumentType::Submission => self.submission,
            DocumentType::Unknown => 0,
        }
    }

    pub fn max(&self) -> usize {
        self.policy.max(self.claim).max(self.submission)
    }

    /// Highest-scoring type, ties going to the earlier profile.
    pub fn winner(&self) -> DocumentType {
        let max = self.max();
        if max == 0 {
            return DocumentType::Unknown;
        }
        DocumentType::TYPED
            .into_iter()
            .find(|t| self.get(*t) == max)
            .unwrap_or(DocumentType::Unknown)
    }
}

/// Classifies raw text plus filename into a [`DocumentType`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score text and filename against every profile.
    pub fn scores(&self, text: &str, filename: &str) -> KeywordScores {
        let text_lower = text.to_lowercase();
        let filename_lower = filename.to_lowercase();
        let [policy, claim, submission] =
            PROFILES.map(|p| p.score(&text_lower, &filename_lower));

        KeywordScores {
            policy,
            claim,
            submission,
        }
    }

    /// Classify a document from its text and filename.
    pub fn classify(&self, text: &str, filename: &str) -> DocumentType {
        let scores = self.scores(text, filename);
        let doc_type = scores.winner();

        debug!(
            "Keyword scores for {}: policy={} claim={} submission={} -> {}",
            filename, scores.policy, scores.claim, scores.submission, doc_type
        );

        doc_type
    }

    /// First type (in priority order) whose filename hints match, if any.
    pub fn classify_filename(&self, filename: &str) -> Option<DocumentType> {
        let filename_lower = filename.to_lowercase();
        PROFILES
            .iter()
            .find(|p| p.matches_filename(&filename_lower))
            .map(|p| p.document_type)
    }
}
