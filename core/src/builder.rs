//! Single-writer index construction. A build always starts from a fresh
//! structure; callers publish the result whole (see [`crate::handle`]),
//! so readers never observe a half-built index.

use std::collections::BTreeSet;

use crate::analysis::{StemTable, StopWordSet};
use crate::error::Result;
use crate::index::{Document, InvertedIndex};
use crate::tokenizer::tokenize;

/// Build an inverted index over `docs`.
///
/// Per document: tokenize (case-folded), drop stop words, conflate
/// through the stem table, deduplicate, then add the document id to each
/// surviving token's posting set. Stop-word removal happens before
/// conflation, so a stop word is never stemmed or indexed. Rebuilding
/// from the same inputs yields an equal index regardless of document
/// order; a repeated document id is an error; empty text simply
/// contributes no postings.
pub fn build<I>(docs: I, stopwords: &StopWordSet, stems: &StemTable) -> Result<InvertedIndex>
where
    I: IntoIterator<Item = Document>,
{
    let mut index = InvertedIndex::new();
    for doc in docs {
        let id = doc.id;
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for token in tokenize(&doc.text) {
            if stopwords.contains(&token) {
                continue;
            }
            let stem = stems.conflate(&token);
            if !seen.contains(stem) {
                seen.insert(stem.to_string());
            }
        }
        index.insert_doc(doc)?;
        for token in seen {
            index.insert_posting(token, id);
        }
    }
    tracing::debug!(
        num_docs = index.num_docs(),
        num_tokens = index.num_tokens(),
        "index built"
    );
    Ok(index)
}
