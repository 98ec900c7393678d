//! Permissive top-level key/value extraction for YAML-subset blocks.
//!
//! Front-matter bodies and comment contents are read with `serde_yaml`, but
//! only the top level is inspected: every pair is reported in source order
//! with the byte offset of its key. Duplicate keys are kept.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_yaml::Value;

/// A single top-level key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntry {
    /// Key text (scalar keys only; numbers and booleans are stringified).
    pub key: String,
    /// Parsed right-hand side.
    pub value: Value,
    /// Byte offset of the key inside the extracted text.
    pub offset: usize,
}

/// Outcome of reading a text blob as a key/value block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockExtraction {
    /// The blob is a mapping; pairs in source order.
    Mapping(Vec<BlockEntry>),
    /// The blob parsed, but its root is a scalar, sequence or empty.
    NotAMapping,
    /// The blob is not valid YAML.
    ParseError(String),
}

impl BlockExtraction {
    /// Entries when the blob was a mapping, empty otherwise.
    pub fn entries(&self) -> &[BlockEntry] {
        match self {
            BlockExtraction::Mapping(entries) => entries,
            BlockExtraction::NotAMapping | BlockExtraction::ParseError(_) => &[],
        }
    }
}

/// Turns a text blob into ordered key/value pairs.
pub trait BlockExtractor: Send + Sync {
    /// Extract top-level pairs from `text`. Never panics on malformed input.
    fn extract(&self, text: &str) -> BlockExtraction;
}

/// `serde_yaml` backed extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlBlockExtractor;

impl BlockExtractor for YamlBlockExtractor {
    fn extract(&self, text: &str) -> BlockExtraction {
        extract_block(text)
    }
}

/// Read `text` as a YAML mapping and return its top-level pairs.
pub fn extract_block(text: &str) -> BlockExtraction {
    if text.trim().is_empty() {
        return BlockExtraction::NotAMapping;
    }

    let root = match serde_yaml::from_str::<TopLevel>(text) {
        Ok(root) => root,
        Err(err) => return BlockExtraction::ParseError(err.to_string()),
    };
    let Some(pairs) = root.0 else {
        return BlockExtraction::NotAMapping;
    };

    let candidates = key_candidates(text);
    let mut next_candidate = 0usize;
    let mut search_from = 0usize;
    let mut entries = Vec::with_capacity(pairs.len());

    for (key, value) in pairs {
        let Some(key) = scalar_key(&key) else {
            continue;
        };

        let matched = candidates[next_candidate.min(candidates.len())..]
            .iter()
            .position(|candidate| candidate.key == key)
            .map(|idx| next_candidate + idx);
        let offset = match matched {
            Some(idx) => {
                next_candidate = idx + 1;
                candidates[idx].offset
            }
            None => find_key(text, search_from, &key).unwrap_or(search_from),
        };
        search_from = (offset + key.len()).min(text.len());

        entries.push(BlockEntry { key, value, offset });
    }

    BlockExtraction::Mapping(entries)
}

/// Offset of `key` at or after `from`, preferring an occurrence followed by `:`.
fn find_key(text: &str, from: usize, key: &str) -> Option<usize> {
    let rest = text.get(from..)?;
    let mut first = None;
    for (pos, _) in rest.match_indices(key) {
        let after = rest[pos + key.len()..].trim_start_matches(['"', '\'']);
        if after.trim_start().starts_with(':') {
            return Some(from + pos);
        }
        first.get_or_insert(from + pos);
    }
    first
}

/// Keys are only meaningful as plain scalars.
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// A key token found at the start of an unindented line.
#[derive(Debug)]
struct KeyCandidate {
    key: String,
    offset: usize,
}

fn key_candidates(text: &str) -> Vec<KeyCandidate> {
    let mut candidates = Vec::new();
    let mut line_start = 0usize;

    for raw_line in text.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        if let Some(key) = line_key(line) {
            // quoted keys point at the key text, past the opening quote
            let quoted = line.starts_with(['"', '\'']);
            candidates.push(KeyCandidate {
                key,
                offset: line_start + usize::from(quoted),
            });
        }
        line_start += raw_line.len();
    }

    candidates
}

/// Key text when `line` opens a top-level `key: value` pair.
fn line_key(line: &str) -> Option<String> {
    let first = line.chars().next()?;
    if first.is_whitespace() || matches!(first, '#' | '-' | '?' | '{' | '[' | '&' | '*' | '!') {
        return None;
    }

    if first == '"' || first == '\'' {
        let close = line[1..].find(first)? + 1;
        let after = line[close + 1..].trim_start();
        return after.starts_with(':').then(|| line[1..close].to_string());
    }

    let mut search = 0usize;
    while let Some(pos) = line[search..].find(':') {
        let colon = search + pos;
        let rest = &line[colon + 1..];
        if rest.is_empty() || rest.starts_with([' ', '\t']) {
            let key = line[..colon].trim_end();
            return (!key.is_empty() && !key.contains(" #")).then(|| key.to_string());
        }
        search = colon + 1;
    }

    None
}

/// Root of a block: `Some(pairs)` for a mapping, `None` for anything else.
struct TopLevel(Option<Vec<(Value, Value)>>);

impl<'de> Deserialize<'de> for TopLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TopLevelVisitor)
    }
}

struct TopLevelVisitor;

impl<'de> Visitor<'de> for TopLevelVisitor {
    type Value = TopLevel;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML document")
    }

    fn visit_map<A>(self, mut map: A) -> Result<TopLevel, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::new();
        while let Some(pair) = map.next_entry::<Value, Value>()? {
            pairs.push(pair);
        }
        Ok(TopLevel(Some(pairs)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<TopLevel, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(TopLevel(None))
    }

    fn visit_enum<A>(self, data: A) -> Result<TopLevel, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        let (_, variant) = data.variant::<IgnoredAny>()?;
        de::VariantAccess::newtype_variant::<IgnoredAny>(variant)?;
        Ok(TopLevel(None))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<TopLevel, E> {
        Ok(TopLevel(None))
    }
}
