use crate::composer::{Response, ResponseComposer};
use crate::error::Result;
use crate::selector::{MatchResult, MatchSelector, Selection};
use counsel_knowledge::{KnowledgeBase, KnowledgeStore};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
    pub records: usize,
}

/// Answer a query against one snapshot.
///
/// Pure: the same `(kb, query)` always yields the same response.
#[must_use]
pub fn respond_with(kb: &KnowledgeBase, query: Option<&str>) -> Response {
    let Some(query) = query.filter(|q| !is_blank(q)) else {
        return ResponseComposer::empty_input();
    };

    let selection = MatchSelector::select(kb, query);
    if let Selection::Scored {
        result: MatchResult::Matched { record, score },
        ..
    } = &selection
    {
        log::info!(
            "Matched query '{}' to record {} ({:.3}): {}",
            query,
            record.id,
            score,
            record.question
        );
    }
    ResponseComposer::compose(&selection)
}

/// Blank means only ASCII control characters and spaces
fn is_blank(query: &str) -> bool {
    query.trim_matches(|c: char| c <= ' ').is_empty()
}

/// Question answering engine over a published knowledge base snapshot.
///
/// The snapshot pointer is the only mutable state. Readers clone the `Arc`
/// under a short read lock and match without holding it; `reload` builds the
/// replacement completely before swapping it in, so a call always sees one
/// whole snapshot. Reloads run one at a time, so snapshots are published in
/// the order their reloads were requested.
pub struct ChatEngine<S> {
    store: S,
    snapshot: RwLock<Arc<KnowledgeBase>>,
    reload_lock: Mutex<()>,
    loaded: AtomicBool,
}

impl<S: KnowledgeStore> ChatEngine<S> {
    /// Engine with an empty, unloaded snapshot
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Arc::new(KnowledgeBase::empty())),
            reload_lock: Mutex::new(()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Build an engine and perform the first load
    pub async fn load(store: S) -> Result<Self> {
        let engine = Self::new(store);
        engine.reload().await?;
        Ok(engine)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Currently published snapshot
    pub fn snapshot(&self) -> Arc<KnowledgeBase> {
        self.snapshot.read().clone()
    }

    /// User-facing answer text; never blank
    pub fn get_response(&self, query: Option<&str>) -> String {
        self.respond(query).text
    }

    pub fn respond(&self, query: Option<&str>) -> Response {
        let kb = self.snapshot();
        respond_with(&kb, query)
    }

    /// Re-fetch every record and publish a fresh snapshot.
    ///
    /// On failure the previous snapshot stays in service.
    pub async fn reload(&self) -> Result<ReloadReport> {
        let _guard = self.reload_lock.lock().await;
        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let records = snapshot.len();
                *self.snapshot.write() = snapshot;
                self.loaded.store(true, Ordering::Release);
                log::info!("Loaded {records} Q&A pairs into knowledge base");
                Ok(ReloadReport { records })
            }
            Err(err) => {
                log::warn!("Knowledge base reload failed, keeping previous snapshot: {err}");
                Err(err)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<Arc<KnowledgeBase>> {
        let records = self.store.get_all().await?;
        Ok(Arc::new(KnowledgeBase::new(records)?))
    }

    /// Up to `limit` questions from one category, in serving order
    pub async fn suggested_questions(&self, category_id: u32, limit: usize) -> Result<Vec<String>> {
        let records = self.store.get_by_category(category_id).await?;
        Ok(records
            .into_iter()
            .take(limit)
            .map(|r| r.question)
            .collect())
    }

    /// Up to `count` distinct questions sampled from the current snapshot
    pub fn random_suggestions(&self, count: usize) -> Vec<String> {
        let kb = self.snapshot();
        kb.records()
            .choose_multiple(&mut rand::thread_rng(), count)
            .map(|r| r.question.clone())
            .collect()
    }
}
