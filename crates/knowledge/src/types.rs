use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topic area that question/answer records are filed under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u32,

    /// Display name, e.g. "Tenant Rights"
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            created_at: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A curated question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaRecord {
    /// Unique within a knowledge base
    pub id: u32,

    pub category_id: u32,

    pub question: String,

    /// Returned verbatim when this record is the confident match
    pub answer: String,

    /// Raw curated tag string, e.g. "landlord,deposit,tenant"
    #[serde(default)]
    pub keywords: String,

    /// Curation priority; higher records are served first
    #[serde(default)]
    pub priority: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QaRecord {
    #[must_use]
    pub fn new(
        id: u32,
        category_id: u32,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category_id,
            question: question.into(),
            answer: answer.into(),
            keywords: String::new(),
            priority: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Case-insensitive substring test over question, answer and keywords
    #[must_use]
    pub fn mentions(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.question, &self.answer, &self.keywords]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A Legal Rights Hub entry: a plain-language statement of one right
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalRight {
    pub id: u32,

    pub category_id: u32,

    pub title: String,

    /// One-paragraph summary
    #[serde(default)]
    pub description: String,

    /// Full explanation shown when the right is opened
    #[serde(default)]
    pub details: String,

    /// Statute or authority the right comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LegalRight {
    #[must_use]
    pub fn new(id: u32, category_id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            title: title.into(),
            description: String::new(),
            details: String::new(),
            source: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Case-insensitive substring test over title, description and details
    #[must_use]
    pub fn mentions(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.description, &self.details]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Serving order: priority descending, then id ascending
pub fn serving_order(a: &QaRecord, b: &QaRecord) -> std::cmp::Ordering {
    b.priority.cmp(&a.priority).then(a.id.cmp(&b.id))
}

/// Hub order: category ascending, then id ascending
pub fn hub_order(a: &LegalRight, b: &LegalRight) -> std::cmp::Ordering {
    a.category_id.cmp(&b.category_id).then(a.id.cmp(&b.id))
}
