//! `project.pbxproj` codec.
//! Xcode stores projects as an OpenStep-style ASCII property list: nested
//! dictionaries, arrays, strings and hex data, with `/* ... */` annotations
//! after object identifiers.
//! Reading keeps dictionary order and the annotations so a document can be
//! written back with no changes other than the ones made to it.

mod parse;
mod store;
mod write;

pub use parse::ParseError;
pub use store::PbxprojStore;

use indexmap::IndexMap;
use std::collections::HashMap;

/// A property-list node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    String(String),
    Data(Vec<u8>),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Insertion-ordered dictionary. Keys are unique.
///
/// Equality ignores order; compare `iter()` output when order matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dict {
    entries: IndexMap<String, Value>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Replaces the value in place if `key` exists, otherwise appends.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Replaces the value in place if `key` exists, otherwise inserts it
    /// before the first key that sorts after it.
    pub fn insert_sorted(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        let index = self
            .entries
            .keys()
            .position(|existing| existing.as_str() > key.as_str())
            .unwrap_or(self.entries.len());
        self.entries.shift_insert(index, key, value)
    }

    /// Replaces the value in place if `key` exists, otherwise inserts it
    /// right before `anchor` (or appends when `anchor` is absent).
    pub fn insert_before(&mut self, anchor: &str, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        match self.entries.get_index_of(anchor) {
            Some(index) => self.entries.shift_insert(index, key, value),
            None => self.entries.insert(key, value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A parsed property list plus the annotations found after its strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub root: Value,
    annotations: HashMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Value::Dict(Dict::new()))
    }
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self {
            root,
            annotations: HashMap::new(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (root, annotations) = parse::parse(input)?;
        Ok(Self { root, annotations })
    }

    /// The `/* ... */` comment Xcode wrote after `token`, if any.
    pub fn annotation(&self, token: &str) -> Option<&str> {
        self.annotations.get(token).map(String::as_str)
    }

    pub fn to_openstep(&self) -> String {
        write::to_openstep(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn test_large_object_table_keeps_order_and_lookups() {
        let mut text = String::from("{\n\tobjects = {\n");
        for n in (0..40_000u32).rev() {
            let _ = writeln!(text, "\t\t{n:024X} = {{isa = PBXBuildFile; }};");
        }
        text.push_str("\t};\n}\n");

        let document = Document::parse(&text).unwrap();
        let objects = document
            .root
            .as_dict()
            .and_then(|root| root.get("objects"))
            .and_then(Value::as_dict)
            .unwrap();
        let first = objects.iter().next().map(|(id, _)| id);
        assert_eq!(first, Some(format!("{:024X}", 39_999).as_str()));
        assert!(objects.contains_key(&format!("{:024X}", 0)));
        assert_eq!(objects.iter().count(), 40_000);
    }

    #[test]
    fn test_insert_before_anchor() {
        let mut dict = Dict::new();
        dict.insert("isa", Value::from("XCBuildConfiguration"));
        dict.insert("name", Value::from("Debug"));

        dict.insert_before("name", "buildSettings", Value::Dict(Dict::new()));
        dict.insert_before("name", "isa", Value::from("PBXProject"));
        dict.insert_before("missing", "tail", Value::from("x"));

        let keys: Vec<&str> = dict.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["isa", "buildSettings", "name", "tail"]);
        assert_eq!(dict.get("isa"), Some(&Value::from("PBXProject")));
    }
}
