//! Stop-word filtering and table-driven conflation, shared verbatim by
//! the index builder and the query engine so a term normalizes the same
//! way at both ends.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::error::Result;
use crate::tokenizer::fold;

/// Case-folded set of tokens excluded from indexing and querying.
#[derive(Debug, Default, Clone)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { words: words.into_iter().map(|w| fold(w.as_ref())).collect() }
    }

    /// Load from a JSON string array.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let words: Vec<String> = serde_json::from_reader(reader)?;
        Ok(Self::new(words))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop stop words from an already case-folded token stream,
    /// preserving the order of survivors.
    pub fn filter<'a, I>(&'a self, tokens: I) -> impl Iterator<Item = String> + 'a
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: 'a,
    {
        tokens.into_iter().filter(move |t| !self.contains(t))
    }
}

/// Surface form → stem mapping. Many surface forms may share a stem; a
/// word with no entry is its own stem.
#[derive(Debug, Default, Clone)]
pub struct StemTable {
    stems: HashMap<String, String>,
}

impl StemTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            stems: entries
                .into_iter()
                .map(|(k, v)| (fold(k.as_ref()), fold(v.as_ref())))
                .collect(),
        }
    }

    /// Load from a JSON object of surface → stem pairs.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_reader(reader)?;
        Ok(Self::new(raw))
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    /// Map a case-folded token to its stem, or hand it back unchanged.
    pub fn conflate<'a>(&'a self, token: &'a str) -> &'a str {
        self.stems.get(token).map(String::as_str).unwrap_or(token)
    }
}

/// Run one term through the full pipeline: case-fold, stop-word gate,
/// conflation. `None` means the term is a stop word and matches nothing.
pub fn normalize(term: &str, stopwords: &StopWordSet, stems: &StemTable) -> Option<String> {
    let folded = fold(term);
    if stopwords.contains(&folded) {
        return None;
    }
    Some(stems.conflate(&folded).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_are_case_folded_on_load() {
        let sw = StopWordSet::new(["THE", "And"]);
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(!sw.contains("sql"));
    }

    #[test]
    fn filter_preserves_survivor_order() {
        let sw = StopWordSet::new(["is", "this"]);
        let toks = vec!["this".into(), "is".into(), "sql".into(), "fun".into()];
        let out: Vec<String> = sw.filter(toks).collect();
        assert_eq!(out, vec!["sql", "fun"]);
    }

    #[test]
    fn conflation_falls_back_to_identity() {
        let st = StemTable::new([("teaching", "teach"), ("teaches", "teach")]);
        assert_eq!(st.conflate("teaching"), "teach");
        assert_eq!(st.conflate("teaches"), "teach");
        assert_eq!(st.conflate("python"), "python");
    }

    #[test]
    fn normalize_drops_stop_words_before_conflation() {
        let sw = StopWordSet::new(["teaching"]);
        let st = StemTable::new([("teaching", "teach")]);
        // A stop word is never stemmed, even with a table entry present.
        assert_eq!(normalize("Teaching", &sw, &st), None);
        assert_eq!(normalize("SQL", &sw, &st), Some("sql".into()));
    }

    #[test]
    fn loads_from_json() {
        let sw = StopWordSet::from_json_reader(r#"["is","This"]"#.as_bytes()).unwrap();
        assert!(sw.contains("this"));
        let st = StemTable::from_json_reader(r#"{"Teaches":"teach"}"#.as_bytes()).unwrap();
        assert_eq!(st.conflate("teaches"), "teach");
    }
}
