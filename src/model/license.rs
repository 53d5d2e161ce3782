use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Value;

/// Front matter of a license document, as written by the source repo.
#[derive(Debug, Deserialize, Clone)]
pub struct LicenseFrontMatter {
    pub title: String,

    #[serde(rename = "spdx-id")]
    pub spdx_id: String,

    #[serde(default)]
    pub featured: Option<bool>,

    // Kept untyped: anything but a literal `false` hides the license.
    #[serde(default)]
    pub hidden: Option<Value>,

    pub description: String,

    pub how: String,

    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub conditions: Vec<String>,

    #[serde(default)]
    pub limitations: Vec<String>,
}

/// Visibility after normalization. Only an explicit `hidden: false` makes a
/// license public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Hidden,
    HiddenByDefault,
    /// `hidden` held something other than a boolean or null.
    HiddenInvalid,
}

impl Visibility {
    pub fn from_source(hidden: Option<&Value>) -> Self {
        match hidden {
            Some(Value::Bool(false)) => Visibility::Public,
            Some(Value::Bool(true)) => Visibility::Hidden,
            None | Some(Value::Null) => Visibility::HiddenByDefault,
            Some(_) => Visibility::HiddenInvalid,
        }
    }

    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

fn serialize_hidden<S: Serializer>(v: &Visibility, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_bool(!v.is_public())
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LicenseRecord {
    pub title: String,

    #[serde(rename = "spdx-id")]
    pub spdx_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    #[serde(rename = "hidden", serialize_with = "serialize_hidden")]
    pub visibility: Visibility,

    pub description: String,

    pub how: String,

    pub permissions: Vec<String>,

    pub conditions: Vec<String>,

    pub limitations: Vec<String>,

    pub body: String,
}

impl LicenseRecord {
    pub fn from_document(fm: LicenseFrontMatter, body: &str) -> Self {
        LicenseRecord {
            visibility: Visibility::from_source(fm.hidden.as_ref()),
            title: fm.title,
            spdx_id: fm.spdx_id,
            featured: fm.featured,
            description: fm.description,
            how: fm.how,
            permissions: fm.permissions,
            conditions: fm.conditions,
            limitations: fm.limitations,
            body: body.trim().to_string(),
        }
    }

    /// Collection key: the lowercased SPDX identifier.
    pub fn key(&self) -> String {
        self.spdx_id.to_lowercase()
    }
}

/// Every loaded license keyed by lowercased SPDX id, plus an owned copy of
/// the public subset. Both are translated independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseCatalog {
    public: BTreeMap<String, LicenseRecord>,
    full: BTreeMap<String, LicenseRecord>,
}

impl LicenseCatalog {
    pub fn new(full: BTreeMap<String, LicenseRecord>) -> Self {
        let public = full
            .iter()
            .filter(|(_, r)| r.visibility.is_public())
            .map(|(k, r)| (k.clone(), r.clone()))
            .collect();
        LicenseCatalog { public, full }
    }

    pub fn full(&self) -> &BTreeMap<String, LicenseRecord> {
        &self.full
    }

    pub fn public(&self) -> &BTreeMap<String, LicenseRecord> {
        &self.public
    }

    /// Public and full records, in that order.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut LicenseRecord> {
        self.public.values_mut().chain(self.full.values_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(hidden: Option<bool>) -> LicenseFrontMatter {
        LicenseFrontMatter {
            title: "MIT License".into(),
            spdx_id: "MIT".into(),
            featured: Some(true),
            hidden: hidden.map(Value::Bool),
            description: "A short license.".into(),
            how: "Copy it.".into(),
            permissions: vec!["commercial-use".into()],
            conditions: vec!["include-copyright".into()],
            limitations: vec!["liability".into()],
        }
    }

    #[test]
    fn visibility_requires_explicit_false() {
        assert_eq!(Visibility::from_source(Some(&Value::Bool(false))), Visibility::Public);
        assert_eq!(Visibility::from_source(Some(&Value::Bool(true))), Visibility::Hidden);
        assert_eq!(Visibility::from_source(None), Visibility::HiddenByDefault);
        assert_eq!(Visibility::from_source(Some(&Value::Null)), Visibility::HiddenByDefault);
        assert_eq!(
            Visibility::from_source(Some(&Value::String("false".into()))),
            Visibility::HiddenInvalid
        );
        assert_eq!(
            Visibility::from_source(Some(&Value::Number(0.into()))),
            Visibility::HiddenInvalid
        );
    }

    #[test]
    fn record_serializes_hidden_flag_and_field_order() {
        let rec = LicenseRecord::from_document(front_matter(None), "\n\n  body text \n");
        let json = serde_json::to_string(&rec).unwrap();

        assert!(json.starts_with(r#"{"title":"MIT License","spdx-id":"MIT","featured":true,"hidden":true,"#));
        assert_eq!(rec.body, "body text");
        assert_eq!(rec.key(), "mit");
    }

    #[test]
    fn absent_featured_is_omitted() {
        let mut fm = front_matter(Some(false));
        fm.featured = None;
        let v = serde_json::to_value(LicenseRecord::from_document(fm, "b")).unwrap();

        assert!(v.get("featured").is_none());
        assert_eq!(v["hidden"], serde_json::json!(false));
    }

    #[test]
    fn public_view_filters_hidden_records() {
        let mut full = BTreeMap::new();
        let public = LicenseRecord::from_document(front_matter(Some(false)), "a");
        let mut hidden = LicenseRecord::from_document(front_matter(None), "b");
        hidden.spdx_id = "WTFPL".into();
        full.insert(public.key(), public);
        full.insert(hidden.key(), hidden);

        let catalog = LicenseCatalog::new(full);
        let view = catalog.public();

        assert_eq!(catalog.full().len(), 2);
        assert_eq!(view.keys().collect::<Vec<_>>(), vec!["mit"]);
        assert_eq!(view["mit"], catalog.full()["mit"]);
    }
}
