//! Lexical question matching for the legal Q&A assistant.
//!
//! ```text
//! query ─> normalize ─> keywords ─> MatchSelector ──(score ≥ 0.3)──> stored answer
//!                                       │ SimilarityScorer per record
//!                                       └─(no match)─> CategoryClassifier ─> fallback text
//! ```

mod classifier;
mod composer;
mod engine;
mod error;
mod keywords;
mod normalize;
mod scorer;
mod selector;

pub use classifier::{CategoryClassifier, Topic};
pub use composer::{Outcome, Response, ResponseComposer, EMPTY_QUERY_PROMPT, REPHRASE_PROMPT};
pub use engine::{respond_with, ChatEngine, ReloadReport};
pub use error::{MatchError, Result};
pub use keywords::{KeywordExtractor, Keywords, STOP_WORDS};
pub use normalize::normalize;
pub use scorer::{jaccard, ScoreBreakdown, SimilarityScorer};
pub use selector::{qualifies, MatchResult, MatchSelector, PreparedQuery, Selection, MATCH_THRESHOLD};

pub use counsel_knowledge::{KnowledgeBase, KnowledgeStore, QaRecord};
