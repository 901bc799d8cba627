use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::curie::Curie;
use crate::error::{DkgError, Result};
use crate::models::entity::Entity;

/// Direction of the relation relative to the anchor nodes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelationDirection {
    /// Source to target
    #[default]
    Right,
    /// Target to source
    Left,
    Both,
}

impl std::str::FromStr for RelationDirection {
    type Err = DkgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "right" => Ok(RelationDirection::Right),
            "left" => Ok(RelationDirection::Left),
            "both" => Ok(RelationDirection::Both),
            other => Err(DkgError::InvalidRequest(format!(
                "unknown relation direction '{}', expected right, left or both",
                other
            ))),
        }
    }
}

/// Filter for the relation query endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationQuery {
    /// Anchor node the relations must end at
    pub target_curie: String,
    /// Relation types to match; empty matches any type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_direction: Option<RelationDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_curie: Option<String>,
    /// Prefix the source node must belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_min_hops: Option<u32>,
    /// Zero means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_max_hops: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub distinct: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub full: bool,
}

impl RelationQuery {
    pub fn new(target_curie: impl Into<String>) -> Self {
        Self {
            target_curie: target_curie.into(),
            relations: Vec::new(),
            relation_direction: None,
            limit: None,
            source_curie: None,
            source_type: None,
            target_type: None,
            relation_min_hops: None,
            relation_max_hops: None,
            distinct: false,
            full: false,
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relations.push(relation.into());
        self
    }

    pub fn with_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations.extend(relations.into_iter().map(Into::into));
        self
    }

    pub fn with_direction(mut self, direction: RelationDirection) -> Self {
        self.relation_direction = Some(direction);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_source(mut self, source_curie: impl Into<String>) -> Self {
        self.source_curie = Some(source_curie.into());
        self
    }

    pub fn with_source_type(mut self, prefix: impl Into<String>) -> Self {
        self.source_type = Some(prefix.into());
        self
    }

    pub fn with_target_type(mut self, prefix: impl Into<String>) -> Self {
        self.target_type = Some(prefix.into());
        self
    }

    pub fn with_hops(mut self, min: u32, max: u32) -> Self {
        self.relation_min_hops = Some(min);
        self.relation_max_hops = Some(max);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Check identifiers and hop bounds before the query is sent
    pub fn validate(&self) -> Result<()> {
        Curie::validate(&self.target_curie)?;
        if let Some(source) = &self.source_curie {
            Curie::validate(source)?;
        }
        for relation in &self.relations {
            Curie::validate(relation)?;
        }

        let min = self.relation_min_hops.unwrap_or(1);
        if min < 1 {
            return Err(DkgError::InvalidRequest(
                "relation_min_hops must be at least 1".to_string(),
            ));
        }
        if let Some(max) = self.relation_max_hops {
            if max != 0 && max < min {
                return Err(DkgError::InvalidRequest(format!(
                    "relation_max_hops ({}) is less than relation_min_hops ({})",
                    max, min
                )));
            }
        }

        Ok(())
    }
}

/// Predicate of a returned triple: one relation, or the path of a multi-hop match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Predicate {
    Single(String),
    Path(Vec<String>),
}

impl Predicate {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Predicate::Single(p) => Some(p),
            Predicate::Path(_) => None,
        }
    }

    pub fn curies(&self) -> Vec<&str> {
        match self {
            Predicate::Single(p) => vec![p.as_str()],
            Predicate::Path(path) => path.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Single(p) => write!(f, "{}", p),
            Predicate::Path(path) => write!(f, "{}", path.join(" -> ")),
        }
    }
}

impl PartialEq<&str> for Predicate {
    fn eq(&self, other: &&str) -> bool {
        self.as_single() == Some(*other)
    }
}

/// A matched triple, all parts given as CURIEs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationResponse {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
}

/// Edge attributes returned with a full relation query
pub type EdgeProperties = BTreeMap<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FullPredicate {
    Single(EdgeProperties),
    Path(Vec<EdgeProperties>),
}

/// A matched triple with entity records on both ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FullRelationResponse {
    pub subject: Entity,
    pub predicate: FullPredicate,
    pub object: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_query_body() {
        let query = RelationQuery::new("ncbitaxon:10090").with_relation("vo:0001243");
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            json!({ "target_curie": "ncbitaxon:10090", "relations": ["vo:0001243"] })
        );
    }

    #[test]
    fn test_optional_fields_are_sent_when_set() {
        let query = RelationQuery::new("symp:0000570")
            .with_direction(RelationDirection::Both)
            .with_limit(2)
            .with_hops(1, 0)
            .distinct();
        let body = serde_json::to_value(&query).unwrap();

        assert_eq!(body["relation_direction"], "both");
        assert_eq!(body["limit"], 2);
        assert_eq!(body["relation_max_hops"], 0);
        assert_eq!(body["distinct"], true);
        assert!(body.get("relations").is_none());
        assert!(body.get("full").is_none());
    }

    #[test]
    fn test_validate_catches_bad_curies() {
        assert!(RelationQuery::new("ncbitaxon10090")
            .validate()
            .unwrap_err()
            .is_invalid_curie());
        assert!(RelationQuery::new("ncbitaxon:10090")
            .with_relation("vo::0001243")
            .validate()
            .unwrap_err()
            .is_invalid_curie());
        assert!(RelationQuery::new("ncbitaxon:10090")
            .with_source("vo")
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_hop_bounds() {
        assert!(RelationQuery::new("bfo:0000002").with_hops(1, 0).validate().is_ok());
        assert!(RelationQuery::new("bfo:0000002").with_hops(2, 3).validate().is_ok());
        assert!(matches!(
            RelationQuery::new("bfo:0000002").with_hops(3, 2).validate(),
            Err(DkgError::InvalidRequest(_))
        ));
        assert!(RelationQuery::new("bfo:0000002").with_hops(0, 1).validate().is_err());
    }

    #[test]
    fn test_predicate_single_or_path() {
        let single: RelationResponse = serde_json::from_value(json!({
            "subject": "vo:0005143", "predicate": "vo:0001243", "object": "ncbitaxon:10090"
        }))
        .unwrap();
        assert!(single.predicate == "vo:0001243");

        let path: RelationResponse = serde_json::from_value(json!({
            "subject": "bfo:0000002",
            "predicate": ["rdfs:subClassOf", "rdfs:subClassOf"],
            "object": "bfo:0000001"
        }))
        .unwrap();
        assert_eq!(path.predicate.curies().len(), 2);
        assert_eq!(path.predicate.to_string(), "rdfs:subClassOf -> rdfs:subClassOf");
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("LEFT".parse::<RelationDirection>().unwrap(), RelationDirection::Left);
        assert!("up".parse::<RelationDirection>().is_err());
    }
}
