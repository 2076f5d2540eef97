//! In-memory inverted text index: tokenize, drop stop words, conflate
//! surface forms through a stem table, then map each surviving token to
//! the set of document ids containing it. Keyword queries are direct map
//! lookups; phrase queries fall back to a linear scan of the raw text.

pub mod analysis;
pub mod builder;
pub mod error;
pub mod handle;
pub mod index;
pub mod query;
pub mod source;
pub mod tokenizer;

pub use analysis::{StemTable, StopWordSet};
pub use builder::build;
pub use error::{Error, Result};
pub use handle::IndexHandle;
pub use index::{DocId, Document, InvertedIndex};
pub use query::{QueryEngine, QueryMode};
