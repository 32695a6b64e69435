use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Knowledge store error: {0}")]
    Store(#[from] counsel_knowledge::KnowledgeError),
}
