//! Boundary loader for document files. The engine itself never touches
//! the filesystem; this adapter turns on-disk JSON into [`Document`]s
//! for the builder.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::index::Document;

/// Read documents from a `.json` (single object or array) or `.jsonl`
/// (one object per line, blank lines skipped) file, chosen by extension.
/// Files without a `.jsonl` extension are parsed as JSON.
pub fn read_documents(path: &Path) -> Result<Vec<Document>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("jsonl") => read_jsonl(path),
        _ => read_json(path),
    }
}

fn read_jsonl(path: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(File::open(path)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(path: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(File::open(path)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Document>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(docs)
}
