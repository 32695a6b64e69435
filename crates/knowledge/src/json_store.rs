use crate::error::{KnowledgeError, Result};
use crate::store::KnowledgeStore;
use crate::types::{hub_order, serving_order, Category, LegalRight, QaRecord};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// On-disk layout of a knowledge file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub records: Vec<QaRecord>,
    #[serde(default)]
    pub rights: Vec<LegalRight>,
}

impl KnowledgeDocument {
    /// Check id uniqueness, category references and required text
    pub fn validate(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(KnowledgeError::Other(format!(
                    "Duplicate category id: {}",
                    category.id
                )));
            }
        }

        let mut record_ids = HashSet::new();
        for record in &self.records {
            if !record_ids.insert(record.id) {
                return Err(KnowledgeError::DuplicateId(record.id));
            }
            if record.question.trim().is_empty() {
                return Err(KnowledgeError::InvalidRecord {
                    id: record.id,
                    reason: "question is empty".to_string(),
                });
            }
            if record.answer.trim().is_empty() {
                return Err(KnowledgeError::InvalidRecord {
                    id: record.id,
                    reason: "answer is empty".to_string(),
                });
            }
            if !self.categories.is_empty() && !category_ids.contains(&record.category_id) {
                return Err(KnowledgeError::UnknownCategory(record.category_id));
            }
        }

        let mut right_ids = HashSet::new();
        for right in &self.rights {
            if !right_ids.insert(right.id) {
                return Err(KnowledgeError::Other(format!(
                    "Duplicate right id: {}",
                    right.id
                )));
            }
            if right.title.trim().is_empty() {
                return Err(KnowledgeError::Other(format!(
                    "Right {} has an empty title",
                    right.id
                )));
            }
            if !self.categories.is_empty() && !category_ids.contains(&right.category_id) {
                return Err(KnowledgeError::UnknownCategory(right.category_id));
            }
        }
        Ok(())
    }
}

/// Fields supplied by a curator when adding a record
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub category_id: u32,
    pub question: String,
    pub answer: String,
    pub keywords: String,
    pub priority: u32,
}

/// Knowledge store backed by a single JSON file.
///
/// The file is re-read on every query so that a reload picks up edits made
/// by other processes.
pub struct JsonKnowledgeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonKnowledgeStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the whole document
    pub async fn load_document(&self) -> Result<KnowledgeDocument> {
        log::debug!("Reading knowledge file {:?}", self.path);
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(KnowledgeError::StoreUnavailable(format!(
                    "knowledge file {} not found",
                    self.path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        let document: KnowledgeDocument = serde_json::from_str(&data)?;
        document.validate()?;
        Ok(document)
    }

    /// Write the document through a temp file and rename
    pub async fn save_document(&self, document: &KnowledgeDocument) -> Result<()> {
        document.validate()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::info!(
            "Saved {} records to {:?}",
            document.records.len(),
            self.path
        );
        Ok(())
    }

    /// Append a record with the next free id and current timestamps
    pub async fn add_record(&self, new: NewRecord) -> Result<QaRecord> {
        let _guard = self.write_lock.lock().await;

        let mut document = match self.load_document().await {
            Ok(document) => document,
            Err(KnowledgeError::StoreUnavailable(_)) => KnowledgeDocument::default(),
            Err(err) => return Err(err),
        };

        if !document.categories.is_empty()
            && !document.categories.iter().any(|c| c.id == new.category_id)
        {
            return Err(KnowledgeError::UnknownCategory(new.category_id));
        }

        let id = document
            .records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| KnowledgeError::Other("record id space exhausted".to_string()))?;
        let now = Utc::now();
        let record = QaRecord::new(id, new.category_id, new.question, new.answer)
            .keywords(new.keywords)
            .priority(new.priority)
            .timestamps(Some(now), Some(now));

        document.records.push(record.clone());
        self.save_document(&document).await?;
        log::info!("Added record {}: {}", record.id, record.question);
        Ok(record)
    }
}

#[async_trait]
impl KnowledgeStore for JsonKnowledgeStore {
    async fn get_all(&self) -> Result<Vec<QaRecord>> {
        let mut records = self.load_document().await?.records;
        records.sort_by(serving_order);
        log::info!("Retrieved {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.load_document().await?.categories;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn rights(&self) -> Result<Vec<LegalRight>> {
        let mut rights = self.load_document().await?.rights;
        rights.sort_by(hub_order);
        log::info!("Retrieved {} legal rights from {:?}", rights.len(), self.path);
        Ok(rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "categories": [
            {"id": 1, "name": "Tenant Rights"},
            {"id": 2, "name": "Consumer Rights", "description": "Purchases"}
        ],
        "records": [
            {"id": 1, "category_id": 1, "question": "Can my landlord enter?", "answer": "With notice.", "keywords": "landlord,entry", "priority": 1},
            {"id": 2, "category_id": 2, "question": "Refund for defective goods?", "answer": "Yes.", "keywords": "refund,defective", "priority": 3},
            {"id": 3, "category_id": 1, "question": "Deposit deductions?", "answer": "Only damages.", "keywords": "deposit", "priority": 3}
        ],
        "rights": [
            {"id": 2, "category_id": 2, "title": "Right to a refund", "description": "Defective goods can be returned.", "source": "Consumer Protection Act"},
            {"id": 1, "category_id": 1, "title": "Right to notice before entry", "details": "Landlords must give 24 hours notice."}
        ]
    }"#;

    async fn sample_store(dir: &TempDir) -> JsonKnowledgeStore {
        let path = dir.path().join("knowledge.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        JsonKnowledgeStore::new(path)
    }

    #[tokio::test]
    async fn get_all_orders_by_priority_then_id() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir).await;
        let ids: Vec<u32> = store.get_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn categories_are_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir).await;
        let names: Vec<String> = store
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Consumer Rights", "Tenant Rights"]);
    }

    #[tokio::test]
    async fn missing_file_is_store_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = JsonKnowledgeStore::new(dir.path().join("absent.json"));
        assert!(matches!(
            store.get_all().await,
            Err(KnowledgeError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn unknown_category_reference_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("knowledge.json");
        tokio::fs::write(
            &path,
            r#"{"categories":[{"id":1,"name":"A"}],"records":[{"id":1,"category_id":9,"question":"q","answer":"a"}]}"#,
        )
        .await
        .unwrap();
        let store = JsonKnowledgeStore::new(path);
        assert!(matches!(
            store.get_all().await,
            Err(KnowledgeError::UnknownCategory(9))
        ));
    }

    #[tokio::test]
    async fn add_record_assigns_next_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir).await;
        let added = store
            .add_record(NewRecord {
                category_id: 2,
                question: "Is a warranty transferable?".to_string(),
                answer: "Usually yes.".to_string(),
                keywords: "warranty".to_string(),
                priority: 2,
            })
            .await
            .unwrap();
        assert_eq!(added.id, 4);
        assert!(added.created_at.is_some());

        let reread = JsonKnowledgeStore::new(store.path());
        let warranty = reread.search("warranty").await.unwrap();
        assert_eq!(warranty.len(), 1);
        assert_eq!(warranty[0].answer, "Usually yes.");
    }

    #[tokio::test]
    async fn add_record_rejects_unknown_category() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir).await;
        let err = store
            .add_record(NewRecord {
                category_id: 77,
                question: "q".to_string(),
                answer: "a".to_string(),
                keywords: String::new(),
                priority: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::UnknownCategory(77)));
    }

    #[tokio::test]
    async fn rights_are_read_in_hub_order() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir).await;

        let rights = store.rights().await.unwrap();
        assert_eq!(rights.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rights[1].source.as_deref(), Some("Consumer Protection Act"));

        let hits = store.search_rights("24 hours").await.unwrap();
        assert_eq!(hits.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(store.rights_by_category(2).await.unwrap().len(), 1);
        assert_eq!(
            store.right(2).await.unwrap().map(|r| r.title),
            Some("Right to a refund".to_string())
        );
    }

    #[tokio::test]
    async fn right_with_unknown_category_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("knowledge.json");
        tokio::fs::write(
            &path,
            r#"{"categories":[{"id":1,"name":"A"}],"rights":[{"id":1,"category_id":4,"title":"t"}]}"#,
        )
        .await
        .unwrap();
        let store = JsonKnowledgeStore::new(path);
        assert!(matches!(
            store.rights().await,
            Err(KnowledgeError::UnknownCategory(4))
        ));
    }

    #[tokio::test]
    async fn add_record_after_max_id_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("knowledge.json");
        let full = format!(
            r#"{{"records":[{{"id":{},"category_id":1,"question":"q","answer":"a"}}]}}"#,
            u32::MAX
        );
        tokio::fs::write(&path, &full).await.unwrap();
        let store = JsonKnowledgeStore::new(&path);

        let err = store
            .add_record(NewRecord {
                category_id: 1,
                question: "another".to_string(),
                answer: "answer".to_string(),
                keywords: String::new(),
                priority: 0,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("id space exhausted"), "{err}");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), full);
    }
}
