use crate::keywords::{KeywordExtractor, Keywords};
use crate::normalize::normalize;
use crate::scorer::SimilarityScorer;
use counsel_knowledge::{KnowledgeBase, QaRecord};

/// Minimum score (inclusive) for a candidate to be served as the answer
pub const MATCH_THRESHOLD: f64 = 0.3;

/// A query after normalization and keyword extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    pub normalized: String,
    pub keywords: Keywords,
}

impl PreparedQuery {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let keywords = KeywordExtractor::extract(&normalized);
        Self {
            normalized,
            keywords,
        }
    }
}

/// Outcome of scanning a snapshot for one query
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'kb> {
    Matched { record: &'kb QaRecord, score: f64 },
    NoMatch,
}

impl<'kb> MatchResult<'kb> {
    #[must_use]
    pub fn record(&self) -> Option<&'kb QaRecord> {
        match self {
            MatchResult::Matched { record, .. } => Some(*record),
            MatchResult::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'kb> {
    /// The query has no keywords left after extraction; nothing was scored
    Ambiguous,
    Scored {
        query: PreparedQuery,
        result: MatchResult<'kb>,
    },
}

#[must_use]
pub fn qualifies(score: f64) -> bool {
    score >= MATCH_THRESHOLD
}

pub struct MatchSelector;

impl MatchSelector {
    #[must_use]
    pub fn select<'kb>(kb: &'kb KnowledgeBase, raw_query: &str) -> Selection<'kb> {
        let query = PreparedQuery::new(raw_query);
        if query.keywords.is_empty() {
            return Selection::Ambiguous;
        }
        let result = Self::best_match(kb, &query);
        Selection::Scored { query, result }
    }

    /// Single pass in serving order; the first candidate reaching a strictly
    /// higher qualifying score is kept, so equal scores resolve to the
    /// earlier record.
    #[must_use]
    pub fn best_match<'kb>(kb: &'kb KnowledgeBase, query: &PreparedQuery) -> MatchResult<'kb> {
        let mut best_score = 0.0;
        let mut best: Option<&QaRecord> = None;

        for record in kb.records() {
            let score = SimilarityScorer::score(&query.normalized, &query.keywords, record);
            if score > best_score && qualifies(score) {
                best_score = score;
                best = Some(record);
            }
        }

        log::debug!("Best match score: {best_score:.4}");
        match best {
            Some(record) => MatchResult::Matched {
                record,
                score: best_score,
            },
            None => MatchResult::NoMatch,
        }
    }
}
