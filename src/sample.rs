//! Sample data generation
//!
//! Turns a parsed query tree into placeholder output of the same shape. Scalars become
//! `"<field name>_<counter>"` tokens; list fields always hold [`LIST_SAMPLE_SIZE`] items.
//! The counter lives in a [`SampleGenerator`], so each generator produces its own
//! strictly increasing, duplicate-free token sequence.

use crate::query::{FieldNode, ObjectNode, QueryNode};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::debug;

/// Number of items generated for every list field
pub const LIST_SAMPLE_SIZE: usize = 3;

/// Largest sample, in scalar tokens, produced for a user-supplied query
pub const MAX_SAMPLE_TOKENS: u64 = 100_000;

/// Generated placeholder value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleValue {
    Token(String),
    List(Vec<SampleValue>),
    Object(SampleMap),
}

/// Field-name keyed mapping that preserves insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleMap {
    entries: Vec<(String, SampleValue)>,
    // key -> position in `entries`
    index: HashMap<String, usize>,
}

impl SampleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: String, value: SampleValue) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SampleValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl SampleValue {
    pub fn as_token(&self) -> Option<&str> {
        match self {
            SampleValue::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SampleValue]> {
        match self {
            SampleValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&SampleMap> {
        match self {
            SampleValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Collect every scalar token below this value in traversal order
    pub fn tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SampleValue::Token(t) => out.push(t),
            SampleValue::List(items) => items.iter().for_each(|i| i.collect_tokens(out)),
            SampleValue::Object(map) => map.iter().for_each(|(_, v)| v.collect_tokens(out)),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SampleValue::Token(t) => serde_json::Value::String(t.clone()),
            SampleValue::List(items) => {
                serde_json::Value::Array(items.iter().map(SampleValue::to_json).collect())
            }
            SampleValue::Object(map) => map.to_json(),
        }
    }
}

impl Serialize for SampleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for SampleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleValue::Token(t) => serializer.serialize_str(t),
            SampleValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SampleValue::Object(map) => map.serialize(serializer),
        }
    }
}

/// Walks query trees, owning the token counter
#[derive(Debug, Clone, Default)]
pub struct SampleGenerator {
    counter: u64,
}

impl SampleGenerator {
    /// Generator whose first token uses counter value 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator resuming from a given counter value
    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }

    /// Counter value the next token will use
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Build a mapping for the children of `node`, depth-first in declared order
    pub fn generate(&mut self, node: &ObjectNode) -> SampleMap {
        let start = self.counter;
        let map = self.generate_object(node);
        debug!(
            fields = node.children.len(),
            tokens = self.counter.saturating_sub(start),
            "Generated sample"
        );
        map
    }

    fn generate_object(&mut self, node: &ObjectNode) -> SampleMap {
        let mut map = SampleMap::new();
        for child in &node.children {
            let value = match child {
                QueryNode::FieldList(field) => SampleValue::List(
                    (0..LIST_SAMPLE_SIZE)
                        .map(|_| self.token(field))
                        .collect(),
                ),
                QueryNode::ObjectList(object) => SampleValue::List(
                    (0..LIST_SAMPLE_SIZE)
                        .map(|_| SampleValue::Object(self.generate_object(object)))
                        .collect(),
                ),
                QueryNode::Field(field) => self.token(field),
                QueryNode::Object(object) => SampleValue::Object(self.generate_object(object)),
            };
            map.insert(child.name().to_string(), value);
        }
        map
    }

    // The counter saturates at u64::MAX; tokens past that point repeat.
    fn token(&mut self, field: &FieldNode) -> SampleValue {
        let token = format!("{}_{}", field.name, self.counter);
        self.counter = self.counter.saturating_add(1);
        SampleValue::Token(token)
    }
}

/// Number of scalar tokens generating `node` would produce, saturating at `u64::MAX`
pub fn sample_token_count(node: &ObjectNode) -> u64 {
    let list = LIST_SAMPLE_SIZE as u64;
    node.children.iter().fold(0u64, |total, child| {
        let tokens = match child {
            QueryNode::Field(_) => 1,
            QueryNode::FieldList(_) => list,
            QueryNode::Object(object) => sample_token_count(object),
            QueryNode::ObjectList(object) => sample_token_count(object).saturating_mul(list),
        };
        total.saturating_add(tokens)
    })
}

/// Generate sample data for `node` with a fresh counter starting at 0
pub fn generate_sample(node: &ObjectNode) -> SampleMap {
    SampleGenerator::new().generate(node)
}
