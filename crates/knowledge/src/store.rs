use crate::error::Result;
use crate::types::{hub_order, serving_order, Category, LegalRight, QaRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to a persistent set of question/answer records and the
/// Legal Rights Hub entries filed alongside them.
///
/// Implementations must return records in serving order (priority
/// descending, id ascending) and rights in hub order (category, then id).
/// The matching engine never writes through this trait.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Every record, in serving order
    async fn get_all(&self) -> Result<Vec<QaRecord>>;

    /// Records of one category, in serving order
    async fn get_by_category(&self, category_id: u32) -> Result<Vec<QaRecord>> {
        let mut records: Vec<QaRecord> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|r| r.category_id == category_id)
            .collect();
        records.sort_by(serving_order);
        Ok(records)
    }

    /// Known categories, ordered by name
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Records whose question, answer or keywords contain `term`
    async fn search(&self, term: &str) -> Result<Vec<QaRecord>> {
        let mut records: Vec<QaRecord> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|r| r.mentions(term))
            .collect();
        records.sort_by(serving_order);
        Ok(records)
    }

    /// Every Legal Rights Hub entry, in hub order
    async fn rights(&self) -> Result<Vec<LegalRight>>;

    /// Rights of one category, ordered by id
    async fn rights_by_category(&self, category_id: u32) -> Result<Vec<LegalRight>> {
        let mut rights: Vec<LegalRight> = self
            .rights()
            .await?
            .into_iter()
            .filter(|r| r.category_id == category_id)
            .collect();
        rights.sort_by(hub_order);
        Ok(rights)
    }

    /// Rights whose title, description or details contain `term`
    async fn search_rights(&self, term: &str) -> Result<Vec<LegalRight>> {
        let mut rights: Vec<LegalRight> = self
            .rights()
            .await?
            .into_iter()
            .filter(|r| r.mentions(term))
            .collect();
        rights.sort_by(hub_order);
        log::debug!("Found {} rights matching '{}'", rights.len(), term);
        Ok(rights)
    }

    async fn right(&self, id: u32) -> Result<Option<LegalRight>> {
        Ok(self.rights().await?.into_iter().find(|r| r.id == id))
    }
}

#[async_trait]
impl<S: KnowledgeStore + ?Sized> KnowledgeStore for Arc<S> {
    async fn get_all(&self) -> Result<Vec<QaRecord>> {
        (**self).get_all().await
    }

    async fn get_by_category(&self, category_id: u32) -> Result<Vec<QaRecord>> {
        (**self).get_by_category(category_id).await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        (**self).categories().await
    }

    async fn search(&self, term: &str) -> Result<Vec<QaRecord>> {
        (**self).search(term).await
    }

    async fn rights(&self) -> Result<Vec<LegalRight>> {
        (**self).rights().await
    }

    async fn rights_by_category(&self, category_id: u32) -> Result<Vec<LegalRight>> {
        (**self).rights_by_category(category_id).await
    }

    async fn search_rights(&self, term: &str) -> Result<Vec<LegalRight>> {
        (**self).search_rights(term).await
    }

    async fn right(&self, id: u32) -> Result<Option<LegalRight>> {
        (**self).right(id).await
    }
}
