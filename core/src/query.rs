//! Read-side of the index. Keyword lookups run the same normalization
//! pipeline as indexing, so a term that would have been discarded at
//! index time (a stop word) matches nothing rather than everything.

use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::analysis::{normalize, StemTable, StopWordSet};
use crate::error::{Error, Result};
use crate::index::{DocId, InvertedIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Single,
    Or,
    Phrase,
}

impl FromStr for QueryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(QueryMode::Single),
            "or" => Ok(QueryMode::Or),
            "phrase" => Ok(QueryMode::Phrase),
            other => Err(Error::InvalidQueryMode(other.to_string())),
        }
    }
}

/// Evaluates queries against one published index. Holds only shared
/// references; any number of engines may read the same index at once.
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
    stopwords: &'a StopWordSet,
    stems: &'a StemTable,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex, stopwords: &'a StopWordSet, stems: &'a StemTable) -> Self {
        Self { index, stopwords, stems }
    }

    /// Posting set for one term, O(1) average. A term that normalizes
    /// away (stop word) or has no postings yields the empty set.
    pub fn query_single(&self, term: &str) -> BTreeSet<DocId> {
        match normalize(term, self.stopwords, self.stems) {
            Some(token) => self.index.postings(&token),
            None => BTreeSet::new(),
        }
    }

    /// Union of posting sets over the given terms. Terms that normalize
    /// away contribute nothing; a query of only stop words is empty, not
    /// "all documents".
    pub fn query_or<I, S>(&self, terms: I) -> BTreeSet<DocId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = BTreeSet::new();
        for term in terms {
            out.extend(self.query_single(term.as_ref()));
        }
        out
    }

    /// Substring containment over the raw, unprocessed document text.
    ///
    /// The index is position-agnostic and cannot answer ordered phrase
    /// queries, so this is a deliberate linear scan over every stored
    /// document. Matching is case-sensitive against the original text.
    pub fn query_phrase(&self, pattern: &str) -> BTreeSet<DocId> {
        self.index
            .docs()
            .filter(|(_, text)| text.contains(pattern))
            .map(|(id, _)| id)
            .collect()
    }

    /// Dispatch on a mode: `single` consumes the first term, `or` all of
    /// them, `phrase` the terms joined by single spaces.
    pub fn query(&self, mode: QueryMode, terms: &[String]) -> BTreeSet<DocId> {
        match mode {
            QueryMode::Single => match terms.first() {
                Some(t) => self.query_single(t),
                None => BTreeSet::new(),
            },
            QueryMode::Or => self.query_or(terms),
            QueryMode::Phrase => self.query_phrase(&terms.join(" ")),
        }
    }

    /// Resolve a result set to `(id, raw text)` pairs.
    pub fn fetch_texts(&self, ids: &BTreeSet<DocId>) -> Result<Vec<(DocId, &'a str)>> {
        ids.iter()
            .map(|&id| self.index.doc_text(id).map(|t| (id, t)))
            .collect()
    }
}
