//! JSON-LD extraction from HTML
//!
//! Locates <script type="application/ld+json"> blocks and searches the parsed
//! trees. Supports @graph arrays and multiple JSON-LD blocks.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::debug;

use crate::document::ParsedDocument;
use crate::error::Result;

const JSONLD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Parse every JSON-LD block in document order, skipping malformed ones.
pub fn locate(document: &ParsedDocument) -> Vec<Value> {
    let mut blocks = Vec::new();

    for (index, element) in document.select(JSONLD_SELECTOR).into_iter().enumerate() {
        let content: String = element.text().collect();
        let trimmed = content.trim();

        if trimmed.is_empty() {
            continue;
        }

        match parse_block(trimmed) {
            Ok(json) => blocks.push(json),
            Err(err) => debug!(block = index, error = %err, "skipping malformed JSON-LD block"),
        }
    }

    blocks
}

pub fn parse_block(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Mapping nodes at the top of each block: a list block contributes its
/// mapping elements, a mapping block contributes itself.
pub fn top_level_entries(blocks: &[Value]) -> Vec<&Value> {
    let mut entries = Vec::new();
    for block in blocks {
        match block {
            Value::Array(items) => entries.extend(items.iter().filter(|v| v.is_object())),
            Value::Object(_) => entries.push(block),
            _ => {}
        }
    }
    entries
}

/// Top-level entries followed by the mapping members of their @graph.
pub fn graph_entries(blocks: &[Value]) -> Vec<&Value> {
    let mut entries = Vec::new();
    for entry in top_level_entries(blocks) {
        entries.push(entry);
        if let Some(Value::Array(graph)) = entry.get("@graph") {
            entries.extend(graph.iter().filter(|v| v.is_object()));
        }
    }
    entries
}

/// Breadth-first walk over one block, queueing @graph members as they appear.
pub fn bfs_with_graph(block: &Value) -> Vec<&Value> {
    let mut queue: VecDeque<&Value> = match block {
        Value::Array(items) => items.iter().collect(),
        other => VecDeque::from([other]),
    };
    let mut visited = Vec::new();

    while let Some(entry) = queue.pop_front() {
        if !entry.is_object() {
            continue;
        }
        if let Some(Value::Array(graph)) = entry.get("@graph") {
            queue.extend(graph.iter());
        }
        visited.push(entry);
    }

    visited
}

/// Whether a value carries data: not null, false, or empty.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

/// First present value stored under `key`, depth-first and left to right.
pub fn find_by_key<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    find_key_map(tree, &|k: &str| k == key, &|v: &'a Value| {
        is_present(v).then_some(v)
    })
}

/// Depth-first search for the first accepted key whose value `map` accepts.
///
/// A mapping's own keys are checked before descending into its values.
pub fn find_key_map<'a, T, K, M>(tree: &'a Value, accept: &K, map: &M) -> Option<T>
where
    K: Fn(&str) -> bool,
    M: Fn(&'a Value) -> Option<T>,
{
    match tree {
        Value::Object(obj) => {
            let own = obj
                .iter()
                .filter(|(k, _)| accept(k.as_str()))
                .find_map(|(_, v)| map(v));
            if own.is_some() {
                return own;
            }
            obj.values().find_map(|v| find_key_map(v, accept, map))
        }
        Value::Array(items) => items.iter().find_map(|v| find_key_map(v, accept, map)),
        _ => None,
    }
}

/// Whether a node's @type (or type) names one of `names`, ignoring case.
pub fn has_type(node: &Value, names: &[&str]) -> bool {
    let type_val = match node.get("@type").or_else(|| node.get("type")) {
        Some(v) => v,
        None => return false,
    };
    let matches = |s: &str| names.iter().any(|n| n.eq_ignore_ascii_case(s));

    match type_val {
        Value::String(s) => matches(s),
        Value::Array(arr) => arr.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// Every mapping node typed as one of `names`, in document order.
///
/// Walks all nested values, so nodes inside @graph arrays are found whether or
/// not the node holding the graph matches.
pub fn find_by_type<'a>(tree: &'a Value, names: &[&str]) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_typed(tree, names, &mut found);
    found
}

fn collect_typed<'a>(value: &'a Value, names: &[&str], found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(obj) => {
            if has_type(value, names) {
                found.push(value);
            }
            for child in obj.values() {
                collect_typed(child, names, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_typed(item, names, found);
            }
        }
        _ => {}
    }
}

/// `find_by_type` across every block.
pub fn find_all_by_type<'a>(blocks: &'a [Value], names: &[&str]) -> Vec<&'a Value> {
    blocks
        .iter()
        .flat_map(|block| find_by_type(block, names))
        .collect()
}
