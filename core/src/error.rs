use crate::index::DocId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Two input documents carried the same id at build time.
    #[error("duplicate document id {0}")]
    DuplicateDocId(DocId),
    /// A raw-text fetch named a document the index does not hold.
    #[error("document {0} not found")]
    DocNotFound(DocId),
    /// Query mode string was not one of `single`, `or`, `phrase`.
    #[error("invalid query mode `{0}`")]
    InvalidQueryMode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed input: {0}")]
    Json(#[from] serde_json::Error),
}
