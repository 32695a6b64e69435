use crate::error::{KnowledgeError, Result};
use crate::types::{serving_order, QaRecord};
use std::collections::HashSet;

/// Immutable, point-in-time copy of the knowledge base.
///
/// Records are kept in serving order (priority descending, id ascending).
/// Matching relies on this order to break score ties, so a snapshot can only
/// be built through [`KnowledgeBase::new`], which validates and sorts.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    records: Vec<QaRecord>,
}

impl KnowledgeBase {
    /// Build a snapshot, rejecting duplicate ids and blank answers
    pub fn new(mut records: Vec<QaRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(KnowledgeError::DuplicateId(record.id));
            }
            if record.answer.trim().is_empty() {
                return Err(KnowledgeError::InvalidRecord {
                    id: record.id,
                    reason: "answer is empty".to_string(),
                });
            }
        }
        records.sort_by(serving_order);
        Ok(Self { records })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records in serving order
    #[must_use]
    pub fn records(&self) -> &[QaRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
