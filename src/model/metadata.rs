use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Source side: shapes of the `_data` YAML files.

#[derive(Debug, Deserialize, Clone)]
pub struct RuleItem {
    pub tag: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RulesDocument {
    pub permissions: Vec<RuleItem>,
    pub conditions: Vec<RuleItem>,
    pub limitations: Vec<RuleItem>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FieldItem {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetaItem {
    pub name: String,
    pub description: String,

    #[serde(default)]
    pub required: Option<bool>,
}

/// `meta.yml` is keyed by an internal id, but a plain list is accepted too.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum MetaDocument {
    List(Vec<MetaItem>),
    Map(serde_yaml::Mapping),
}

// Output side: keyed maps written as JSON.

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub permissions: BTreeMap<String, RuleEntry>,
    pub conditions: BTreeMap<String, RuleEntry>,
    pub limitations: BTreeMap<String, RuleEntry>,
}

impl RuleSet {
    pub fn groups_mut(&mut self) -> [&mut BTreeMap<String, RuleEntry>; 3] {
        [
            &mut self.permissions,
            &mut self.conditions,
            &mut self.limitations,
        ]
    }
}

/// Field name -> description.
pub type FieldMap = BTreeMap<String, String>;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MetaEntry {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Meta field name -> entry.
pub type MetaMap = BTreeMap<String, MetaEntry>;

/// Which auxiliary document a data file holds; decided by its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Rules,
    Fields,
    Meta,
}

impl DataKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "rules.yml" => Some(DataKind::Rules),
            "fields.yml" => Some(DataKind::Fields),
            "meta.yml" => Some(DataKind::Meta),
            _ => None,
        }
    }
}

/// A transformed auxiliary document, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOutput {
    Rules(RuleSet),
    Fields(FieldMap),
    Meta(MetaMap),
}

impl DataOutput {
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            DataOutput::Rules(v) => serde_json::to_string_pretty(v),
            DataOutput::Fields(v) => serde_json::to_string_pretty(v),
            DataOutput::Meta(v) => serde_json::to_string_pretty(v),
        }
    }
}
