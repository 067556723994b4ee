//! Inline SQL detection
//!
//! Scans Python string literals for statements worth sending to the DBA
//! persona. F-strings contribute their literal parts only; interpolated
//! expressions are dropped, so `f"SELECT * FROM {table}"` still registers.

use crate::python::{parse, walk_tree};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SQL_KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|CREATE\s+TABLE|ALTER\s+TABLE|WITH\s+|DROP\s+TABLE|MERGE)\b",
    )
    .expect("valid regex")
});

/// Whether a string literal looks like a SQL statement.
fn looks_like_sql(text: &str) -> bool {
    let stripped = text.trim();
    stripped.len() >= 6 && SQL_KEYWORD_PATTERN.is_match(stripped)
}

/// Extract candidate SQL statements from Python source, de-duplicated in
/// first-seen order. Unparseable source yields an empty list.
pub fn extract_sql_queries(source: &str) -> Vec<String> {
    let Ok(tree) = parse(source) else {
        return Vec::new();
    };

    let mut queries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    walk_tree(tree.root_node(), &mut |node| {
        if node.kind() != "string" {
            return;
        }
        // Literal parts only: an f-string's interpolations are skipped.
        let mut literal = String::new();
        let mut cursor = node.walk();
        for part in node.children(&mut cursor) {
            if part.kind() == "string_content" {
                if let Ok(text) = part.utf8_text(source.as_bytes()) {
                    literal.push_str(text);
                }
            }
        }
        let candidate = literal.trim().to_string();
        if looks_like_sql(&candidate) && seen.insert(candidate.clone()) {
            queries.push(candidate);
        }
    });
    queries
}
