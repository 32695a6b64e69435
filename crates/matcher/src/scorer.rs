use crate::keywords::{KeywordExtractor, Keywords};
use crate::normalize::normalize;
use counsel_knowledge::QaRecord;
use serde::Serialize;

/// Weight of curated-keyword overlap
pub const KEYWORD_WEIGHT: f64 = 0.4;
/// Weight of question-text keyword overlap
pub const QUESTION_WEIGHT: f64 = 0.4;
/// Weight of the phrase containment bonus
pub const SUBSTRING_WEIGHT: f64 = 0.15;
/// Weight of the curation priority term
pub const PRIORITY_WEIGHT: f64 = 0.05;

/// Raw value of the containment factor before weighting
pub const SUBSTRING_BONUS: f64 = 0.3;
/// Priority is scaled by this before weighting
pub const PRIORITY_SCALE: f64 = 0.01;

/// Jaccard similarity |A ∩ B| / |A ∪ B|; two empty sets score 0.
#[must_use]
pub fn jaccard(a: &Keywords, b: &Keywords) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Per-factor view of one candidate's score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub question: f64,
    pub substring: f64,
    pub priority_boost: f64,
    pub total: f64,
}

pub struct SimilarityScorer;

impl SimilarityScorer {
    /// Weighted similarity between a prepared query and one record
    #[must_use]
    pub fn score(query_normalized: &str, query_keywords: &Keywords, candidate: &QaRecord) -> f64 {
        Self::breakdown(query_normalized, query_keywords, candidate).total
    }

    #[must_use]
    pub fn breakdown(
        query_normalized: &str,
        query_keywords: &Keywords,
        candidate: &QaRecord,
    ) -> ScoreBreakdown {
        let tag_keywords = KeywordExtractor::extract(&candidate.keywords);
        let keyword = jaccard(query_keywords, &tag_keywords);

        let question_normalized = normalize(&candidate.question);
        let question_keywords = KeywordExtractor::extract(&question_normalized);
        let question = jaccard(query_keywords, &question_keywords);

        let substring = if question_normalized.contains(query_normalized)
            || query_normalized.contains(question_normalized.as_str())
        {
            SUBSTRING_BONUS
        } else {
            0.0
        };

        let priority_boost = f64::from(candidate.priority) * PRIORITY_SCALE;

        let total = keyword * KEYWORD_WEIGHT
            + question * QUESTION_WEIGHT
            + substring * SUBSTRING_WEIGHT
            + priority_boost * PRIORITY_WEIGHT;

        ScoreBreakdown {
            keyword,
            question,
            substring,
            priority_boost,
            total,
        }
    }
}
