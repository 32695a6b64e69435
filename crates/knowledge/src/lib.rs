//! # Counsel Knowledge
//!
//! Curated legal question/answer records and the stores that serve them.
//!
//! ## Features
//!
//! - **Snapshots**: [`KnowledgeBase`] is an immutable, validated copy of the
//!   record set, kept in serving order (priority descending, id ascending)
//! - **Store capability**: [`KnowledgeStore`] abstracts where records live
//! - **JSON file store** with atomic saves for curator edits
//! - **In-memory store** for tests and embedding
//! - **Legal Rights Hub**: [`LegalRight`] entries browsable by category or
//!   searched by term
//!
//! ## Example
//!
//! ```no_run
//! use counsel_knowledge::{JsonKnowledgeStore, KnowledgeBase, KnowledgeStore};
//!
//! #[tokio::main]
//! async fn main() -> counsel_knowledge::Result<()> {
//!     let store = JsonKnowledgeStore::new("data/knowledge.json");
//!     let snapshot = KnowledgeBase::new(store.get_all().await?)?;
//!
//!     for record in snapshot.records() {
//!         println!("[{}] {}", record.priority, record.question);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;
mod json_store;
mod memory;
mod snapshot;
mod store;
mod types;

pub use error::{KnowledgeError, Result};
pub use json_store::{JsonKnowledgeStore, KnowledgeDocument, NewRecord};
pub use memory::MemoryKnowledgeStore;
pub use snapshot::KnowledgeBase;
pub use store::KnowledgeStore;
pub use types::{hub_order, serving_order, Category, LegalRight, QaRecord};
