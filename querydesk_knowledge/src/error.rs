use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnowledgeError>;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("invalid regex for extraction rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate document id: {0}")]
    DuplicateDocument(String),
}
