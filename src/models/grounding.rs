use serde::{Deserialize, Serialize};

/// A grounding request: free text plus optional namespace restriction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
}

impl GroundRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            namespaces: None,
        }
    }

    /// Restrict matches to the given ontology prefixes
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = Some(namespaces.into_iter().map(Into::into).collect());
        self
    }
}

/// One ranked grounding candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundingResult {
    /// Dereferenceable link for the term
    pub url: String,
    /// Match confidence in [0, 1]
    pub score: f64,
    pub prefix: String,
    pub identifier: String,
    pub curie: String,
    pub name: String,
    /// Basis of the match, e.g. "name" or "synonym"
    pub status: String,
}

impl GroundingResult {
    /// Whether `curie` agrees with `prefix` and `identifier`
    pub fn is_consistent(&self) -> bool {
        self.curie.split_once(':') == Some((self.prefix.as_str(), self.identifier.as_str()))
    }
}

/// Candidates in the order the service ranked them, best first
pub type GroundingResults = Vec<GroundingResult>;

/// Response envelope of the grounding endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundResponse {
    #[serde(default)]
    pub request: Option<GroundRequest>,
    pub results: Vec<GroundingResult>,
}

impl GroundResponse {
    /// Check the per-result invariants, returning a description of the first violation
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        for (i, result) in self.results.iter().enumerate() {
            if !result.score.is_finite() || !(0.0..=1.0).contains(&result.score) {
                return Err(format!(
                    "result {} ({}) has score {} outside [0, 1]",
                    i, result.curie, result.score
                ));
            }
            if !result.is_consistent() {
                return Err(format!(
                    "result {} has curie '{}' but prefix '{}' and identifier '{}'",
                    i, result.curie, result.prefix, result.identifier
                ));
            }
        }
        Ok(())
    }
}
