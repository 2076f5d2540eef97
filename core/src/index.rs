use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};

pub type DocId = u32;

/// A document as supplied by the source: an id unique within one build,
/// plus its raw text. Immutable once indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

/// Token → posting-set mapping plus the raw text store.
///
/// Postings are presence-only sets: duplicate occurrences of a token
/// within one document collapse to a single entry, and no frequency or
/// position is kept. The text store backs phrase queries and raw-text
/// fetches; the postings hold ids, never text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<DocId>>,
    texts: HashMap<DocId, String>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posting set for an already-normalized token, empty if absent.
    pub fn postings(&self, token: &str) -> BTreeSet<DocId> {
        self.postings.get(token).cloned().unwrap_or_default()
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Raw text of a document; `DocNotFound` for an unknown id.
    pub fn doc_text(&self, id: DocId) -> Result<&str> {
        self.texts
            .get(&id)
            .map(String::as_str)
            .ok_or(Error::DocNotFound(id))
    }

    pub fn contains_doc(&self, id: DocId) -> bool {
        self.texts.contains_key(&id)
    }

    pub fn num_docs(&self) -> usize {
        self.texts.len()
    }

    pub fn num_tokens(&self) -> usize {
        self.postings.len()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// All stored documents, unordered.
    pub fn docs(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.texts.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub(crate) fn insert_doc(&mut self, doc: Document) -> Result<()> {
        if self.texts.contains_key(&doc.id) {
            return Err(Error::DuplicateDocId(doc.id));
        }
        self.texts.insert(doc.id, doc.text);
        Ok(())
    }

    pub(crate) fn insert_posting(&mut self, token: String, id: DocId) {
        self.postings.entry(token).or_default().insert(id);
    }
}
