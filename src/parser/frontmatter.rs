//! Front-matter extraction
//!
//! Two delimiter styles are recognized at the very start of a file:
//! - a YAML block between `---` lines
//! - an HTML comment holding `key: value` lines

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static YAML_BLOCK: OnceLock<Regex> = OnceLock::new();
static HTML_COMMENT_BLOCK: OnceLock<Regex> = OnceLock::new();

fn yaml_block() -> &'static Regex {
    YAML_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("static regex")
    })
}

fn html_comment_block() -> &'static Regex {
    HTML_COMMENT_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)\A\s*<!--[ \t]*\r?\n(.*?)\r?\n[ \t]*-->").expect("static regex")
    })
}

/// Split a document into its YAML front-matter text and body
///
/// Returns `None` when the file does not open with a `---` block.
pub fn split_yaml(content: &str) -> Option<(&str, &str)> {
    let caps = yaml_block().captures(content)?;
    let whole = caps.get(0)?;
    let block = caps.get(1).map_or("", |m| m.as_str());
    Some((block, &content[whole.end()..]))
}

/// Parse YAML front-matter text into a mapping
///
/// Malformed YAML and non-mapping documents are treated as absent.
pub fn parse_yaml_mapping(block: &str) -> Option<Mapping> {
    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Mapping(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Ignoring malformed front-matter: {}", e);
            None
        }
    }
}

/// Parse an HTML comment block of `key: value` lines
///
/// The first colon on a line splits key from value; lines without a colon
/// are ignored. An absent block yields an empty map.
pub fn parse_html_comment(content: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let Some(caps) = html_comment_block().captures(content) else {
        return fields;
    };

    for line in caps[1].lines() {
        if let Some((key, value)) = line.trim().split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    fields
}

/// Render a scalar YAML value as text; non-scalars become `None`
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a `globs`-style value into a list of patterns
///
/// A single string becomes a one-element list (empty string → empty list),
/// a sequence keeps its string items, anything else is empty.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}
