use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Kind of ontology term
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EntityKind {
    Class,
    Property,
    Individual,
    Unknown,
}

impl From<String> for EntityKind {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "class" => EntityKind::Class,
            "property" => EntityKind::Property,
            "individual" => EntityKind::Individual,
            _ => EntityKind::Unknown,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Class => write!(f, "class"),
            EntityKind::Property => write!(f, "property"),
            EntityKind::Individual => write!(f, "individual"),
            EntityKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SynonymRepr {
    Plain(String),
    Typed {
        value: String,
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
}

/// Alternate name for an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "SynonymRepr")]
pub struct Synonym {
    pub value: String,
    /// Synonym type CURIE, e.g. `oboinowl:hasExactSynonym`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<SynonymRepr> for Synonym {
    fn from(repr: SynonymRepr) -> Self {
        match repr {
            SynonymRepr::Plain(value) => Synonym { value, kind: None },
            SynonymRepr::Typed { value, kind } => Synonym { value, kind },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum XrefRepr {
    Plain(String),
    Typed {
        id: String,
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
}

/// Cross-reference to a term in another ontology
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "XrefRepr")]
pub struct Xref {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<XrefRepr> for Xref {
    fn from(repr: XrefRepr) -> Self {
        match repr {
            XrefRepr::Plain(id) => Xref { id, kind: None },
            XrefRepr::Typed { id, kind } => Xref { id, kind },
        }
    }
}

/// Full metadata record for one ontology term
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// CURIE of the term
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Deprecated terms are still returned with this flag set
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    #[serde(default)]
    pub alts: Vec<String>,
    #[serde(default)]
    pub xrefs: Vec<Xref>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
    /// Fields returned by the service beyond the common record, e.g. units or bounds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Entity {
    pub fn prefix(&self) -> &str {
        self.id.split_once(':').map_or(self.id.as_str(), |(prefix, _)| prefix)
    }

    /// Name if present, otherwise the CURIE
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn synonym_values(&self) -> impl Iterator<Item = &str> {
        self.synonyms.iter().map(|s| s.value.as_str())
    }
}

/// Name, synonyms and description of an entity, as listed by the lexical endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexicalEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    #[serde(default)]
    pub description: Option<String>,
}
