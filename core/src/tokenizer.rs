use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// NFKC-normalize and lowercase, the same fold applied to documents and
/// query terms.
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Split text into case-folded, whitespace-delimited tokens.
///
/// Punctuation is retained: a token is the exact substring between
/// whitespace runs, so `"#SQL"` tokenizes as `"#sql"`, not `"sql"`.
/// Stop-word removal and conflation happen downstream.
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = fold(text);
    RE.find_iter(&folded).map(|m| m.as_str().to_string()).collect()
}
