use std::collections::BTreeSet;

use sift_core::{build, Document, QueryEngine, StemTable, StopWordSet};

fn docs() -> Vec<Document> {
    vec![
        Document { id: 1, text: "This is SQL and Python and other fun teaching stuff".into() },
        Document { id: 2, text: "More people should learn SQL from Prof_Chuck".into() },
        Document { id: 3, text: "Prof_Chuck also teaches Python and also SQL".into() },
    ]
}

fn stopwords() -> StopWordSet {
    StopWordSet::new(["is", "this", "and"])
}

fn stems() -> StemTable {
    StemTable::new([("teaching", "teach"), ("teaches", "teach")])
}

#[test]
fn end_to_end_scenario() {
    let sw = stopwords();
    let st = stems();
    let idx = build(docs(), &sw, &st).unwrap();

    assert_eq!(idx.postings("sql"), BTreeSet::from([1, 2, 3]));
    assert_eq!(idx.postings("teach"), BTreeSet::from([1, 3]));
    assert_eq!(idx.postings("python"), BTreeSet::from([1, 3]));

    let q = QueryEngine::new(&idx, &sw, &st);
    assert_eq!(q.query_single("SQL"), BTreeSet::from([1, 2, 3]));
    assert_eq!(q.query_single("sQl"), BTreeSet::from([1, 2, 3]));
    assert!(q.query_single("and").is_empty());
}

#[test]
fn rebuilds_are_idempotent_and_order_independent() {
    let sw = stopwords();
    let st = stems();
    let a = build(docs(), &sw, &st).unwrap();
    let b = build(docs(), &sw, &st).unwrap();
    assert_eq!(a, b);

    let mut reversed = docs();
    reversed.reverse();
    let c = build(reversed, &sw, &st).unwrap();
    assert_eq!(a, c);
}

#[test]
fn stop_words_are_excluded_however_often_they_occur() {
    let sw = stopwords();
    let idx = build(
        vec![Document { id: 1, text: "and And AND this is and".into() }],
        &sw,
        &StemTable::default(),
    )
    .unwrap();
    for word in ["and", "is", "this"] {
        assert!(!idx.contains_token(word));
    }
    assert_eq!(idx.num_tokens(), 0);
}

#[test]
fn conflated_forms_share_one_posting_set() {
    let sw = StopWordSet::default();
    let st = stems();
    let idx = build(
        vec![
            Document { id: 10, text: "teaching".into() },
            Document { id: 11, text: "teaches".into() },
        ],
        &sw,
        &st,
    )
    .unwrap();
    assert_eq!(idx.postings("teach"), BTreeSet::from([10, 11]));
    assert!(!idx.contains_token("teaching"));
    assert!(!idx.contains_token("teaches"));
}

#[test]
fn or_query_is_monotone_in_its_terms() {
    let sw = stopwords();
    let st = stems();
    let idx = build(docs(), &sw, &st).unwrap();
    let q = QueryEngine::new(&idx, &sw, &st);

    let terms = ["sql", "python", "teaching", "learn", "and", "missing"];
    for t1 in terms {
        let base = q.query_or([t1]);
        for t2 in terms {
            let wider = q.query_or([t1, t2]);
            assert!(wider.is_superset(&base), "or([{t1},{t2}]) lost docs from or([{t1}])");
        }
    }
}

#[test]
fn token_presence_matches_the_normalized_text() {
    // Every indexed token must occur in at least one document after the
    // same normalization, and never be a stop word.
    let sw = stopwords();
    let st = stems();
    let all = docs();
    let idx = build(all.clone(), &sw, &st).unwrap();

    for token in idx.tokens() {
        assert!(!sw.contains(token));
        let posted = idx.postings(token);
        for doc in &all {
            let occurs = sift_core::tokenizer::tokenize(&doc.text)
                .into_iter()
                .filter(|t| !sw.contains(t))
                .any(|t| st.conflate(&t) == token);
            assert_eq!(posted.contains(&doc.id), occurs, "token {token} vs doc {}", doc.id);
        }
    }
}
