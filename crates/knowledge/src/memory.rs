use crate::error::{KnowledgeError, Result};
use crate::store::KnowledgeStore;
use crate::types::{hub_order, serving_order, Category, LegalRight, QaRecord};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process store, mostly useful for tests and embedding.
///
/// `set_unavailable(true)` makes every read fail with
/// [`KnowledgeError::StoreUnavailable`], which lets callers exercise their
/// stale-snapshot handling.
#[derive(Debug, Default)]
pub struct MemoryKnowledgeStore {
    records: RwLock<Vec<QaRecord>>,
    categories: RwLock<Vec<Category>>,
    rights: RwLock<Vec<LegalRight>>,
    unavailable: AtomicBool,
}

impl MemoryKnowledgeStore {
    #[must_use]
    pub fn new(records: Vec<QaRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self.categories.write() = categories;
        self
    }

    #[must_use]
    pub fn with_rights(self, rights: Vec<LegalRight>) -> Self {
        *self.rights.write() = rights;
        self
    }

    /// Swap the whole record set
    pub fn replace(&self, records: Vec<QaRecord>) {
        *self.records.write() = records;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KnowledgeError::StoreUnavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl KnowledgeStore for MemoryKnowledgeStore {
    async fn get_all(&self) -> Result<Vec<QaRecord>> {
        self.ensure_available()?;
        let mut records = self.records.read().clone();
        records.sort_by(serving_order);
        Ok(records)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.ensure_available()?;
        let mut categories = self.categories.read().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn rights(&self) -> Result<Vec<LegalRight>> {
        self.ensure_available()?;
        let mut rights = self.rights.read().clone();
        rights.sort_by(hub_order);
        Ok(rights)
    }
}
