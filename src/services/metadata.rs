use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::model::metadata::{
    DataKind, DataOutput, FieldItem, FieldMap, MetaDocument, MetaEntry, MetaItem, MetaMap,
    RuleEntry, RuleItem, RuleSet, RulesDocument,
};
use crate::parsers::front_matter::parse_yaml;
use crate::services::encoding;

/// A transformed data file together with the JSON name it is written under.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub json_name: String,
    pub output: DataOutput,
}

pub fn json_name(file_name: &str) -> String {
    Path::new(file_name)
        .with_extension("json")
        .to_string_lossy()
        .into_owned()
}

pub fn transform_rules(doc: RulesDocument) -> RuleSet {
    fn keyed(items: Vec<RuleItem>) -> std::collections::BTreeMap<String, RuleEntry> {
        items
            .into_iter()
            .map(|item| {
                (
                    item.tag,
                    RuleEntry {
                        label: item.label,
                        description: item.description,
                    },
                )
            })
            .collect()
    }

    RuleSet {
        permissions: keyed(doc.permissions),
        conditions: keyed(doc.conditions),
        limitations: keyed(doc.limitations),
    }
}

pub fn transform_fields(items: Vec<FieldItem>) -> FieldMap {
    items
        .into_iter()
        .map(|item| (item.name, item.description))
        .collect()
}

/// Re-keys meta entries by their nested `name`, discarding the outer key.
pub fn transform_meta(path: &Path, doc: MetaDocument) -> Result<MetaMap> {
    let items: Vec<MetaItem> = match doc {
        MetaDocument::List(items) => items,
        MetaDocument::Map(mapping) => mapping
            .into_iter()
            .map(|(_, value)| {
                serde_yaml::from_value(value).map_err(|source| BuildError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            })
            .collect::<Result<_>>()?,
    };

    Ok(items
        .into_iter()
        .map(|item| {
            (
                item.name,
                MetaEntry {
                    description: item.description,
                    required: item.required,
                },
            )
        })
        .collect())
}

pub fn transform(kind: DataKind, path: &Path, text: &str) -> Result<DataOutput> {
    Ok(match kind {
        DataKind::Rules => DataOutput::Rules(transform_rules(parse_yaml(path, text)?)),
        DataKind::Fields => DataOutput::Fields(transform_fields(parse_yaml(path, text)?)),
        DataKind::Meta => DataOutput::Meta(transform_meta(path, parse_yaml(path, text)?)?),
    })
}

/// Transforms each configured data file. A missing or broken file is
/// reported and skipped; the others still go through.
pub fn transform_all(data_dir: &Path, files: &[String]) -> Vec<DataFile> {
    let mut out = Vec::new();

    for name in files {
        let path: PathBuf = data_dir.join(name);

        let Some(kind) = DataKind::from_file_name(name) else {
            tracing::error!(file = %name, "unknown data file, skipping");
            continue;
        };

        if !path.exists() {
            tracing::warn!(path = %path.display(), "data file does not exist, skipping");
            continue;
        }

        let result = encoding::read_text(&path).and_then(|text| transform(kind, &path, &text));
        match result {
            Ok(output) => out.push(DataFile {
                json_name: json_name(name),
                output,
            }),
            Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to transform data file, skipping"),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RULES: &str = r#"
permissions:
  - description: This software and derivatives may be used for commercial purposes.
    label: Commercial use
    tag: commercial-use
conditions:
  - description: A copy of the license must be included.
    label: License and copyright notice
    tag: include-copyright
limitations:
  - description: This license includes a limitation of liability.
    label: Liability
    tag: liability
"#;

    #[test]
    fn rules_are_keyed_by_tag() {
        let out = transform(DataKind::Rules, Path::new("rules.yml"), RULES).unwrap();
        let DataOutput::Rules(rules) = out else {
            panic!("expected rules");
        };

        assert_eq!(
            rules.permissions["commercial-use"],
            RuleEntry {
                label: "Commercial use".into(),
                description: "This software and derivatives may be used for commercial purposes.".into(),
            }
        );
        assert!(rules.conditions.contains_key("include-copyright"));
        assert!(rules.limitations.contains_key("liability"));
    }

    #[test]
    fn fields_map_to_descriptions() {
        let yaml = "- name: fullname\n  description: The full name of the copyright holder\n- name: year\n  description: The current year\n";
        let out = transform(DataKind::Fields, Path::new("fields.yml"), yaml).unwrap();

        let json = serde_json::to_value(match out {
            DataOutput::Fields(f) => f,
            _ => panic!("expected fields"),
        })
        .unwrap();
        assert_eq!(json["year"], "The current year");
    }

    #[test]
    fn meta_is_rekeyed_by_nested_name() {
        let yaml = "m1:\n  name: title\n  description: The license full name\n  required: true\nm2:\n  name: nickname\n  description: Short name\n";
        let out = transform(DataKind::Meta, Path::new("meta.yml"), yaml).unwrap();
        let DataOutput::Meta(meta) = out else {
            panic!("expected meta");
        };

        assert!(!meta.contains_key("m1"));
        assert_eq!(
            meta["title"],
            MetaEntry {
                description: "The license full name".into(),
                required: Some(true),
            }
        );
        assert_eq!(meta["nickname"].required, None);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["title"]["required"], true);
        assert!(json["nickname"].get("required").is_none());
    }

    #[test]
    fn meta_accepts_a_list() {
        let yaml = "- name: title\n  description: The license full name\n  required: true\n";
        let out = transform(DataKind::Meta, Path::new("meta.yml"), yaml).unwrap();
        let DataOutput::Meta(meta) = out else {
            panic!("expected meta");
        };
        assert_eq!(meta["title"].required, Some(true));
    }

    #[test]
    fn missing_and_malformed_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rules.yml"), RULES).unwrap();
        fs::write(dir.path().join("meta.yml"), "just a string").unwrap();

        let files: Vec<String> = ["rules.yml", "fields.yml", "meta.yml"]
            .into_iter()
            .map(String::from)
            .collect();
        let out = transform_all(dir.path(), &files);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].json_name, "rules.json");
    }
}
