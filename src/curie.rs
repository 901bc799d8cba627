use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DkgError, Result};

/// Word-like prefix, exactly one separator, no whitespace, and no `//` authority
static CURIE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_.\-]+):([^:\s/][^:\s]*)$").expect("CURIE pattern is valid")
});

/// A compact URI in the form `<prefix>:<identifier>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Curie {
    prefix: String,
    identifier: String,
}

impl Curie {
    /// Parse and validate a CURIE string
    pub fn parse(value: &str) -> Result<Self> {
        let caps = CURIE_PATTERN
            .captures(value)
            .ok_or_else(|| DkgError::InvalidCurie(value.to_string()))?;

        Ok(Self {
            prefix: caps[1].to_string(),
            identifier: caps[2].to_string(),
        })
    }

    pub fn new(prefix: &str, identifier: &str) -> Result<Self> {
        Self::parse(&format!("{}:{}", prefix, identifier))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Check that a string is a well-formed CURIE without keeping the parts
    pub fn validate(value: &str) -> Result<()> {
        Self::parse(value).map(|_| ())
    }
}

impl fmt::Display for Curie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier)
    }
}

impl FromStr for Curie {
    type Err = DkgError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Curie {
    type Error = DkgError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Curie> for String {
    fn from(curie: Curie) -> Self {
        curie.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_curie() {
        let curie = Curie::parse("ido:0000511").unwrap();
        assert_eq!(curie.prefix(), "ido");
        assert_eq!(curie.identifier(), "0000511");
        assert_eq!(curie.to_string(), "ido:0000511");
    }

    #[test]
    fn test_parse_mixed_case_and_underscores() {
        let curie = Curie::parse("rdfs:subClassOf").unwrap();
        assert_eq!(curie.prefix(), "rdfs");
        assert_eq!(curie.identifier(), "subClassOf");

        assert!(Curie::parse("go:GO_0005634").is_ok());
    }

    #[test]
    fn test_missing_separator_is_rejected() {
        let err = Curie::parse("ido0000511").unwrap_err();
        assert!(err.is_invalid_curie());
    }

    #[test]
    fn test_multiple_separators_are_rejected() {
        assert!(Curie::parse("ido:0000:511").unwrap_err().is_invalid_curie());
        assert!(Curie::parse("http://example.org").unwrap_err().is_invalid_curie());
    }

    #[test]
    fn test_prefix_characters() {
        assert!(Curie::parse("NCBITaxon:10090").is_ok());
        assert!(Curie::parse("bfo.v2:0000001").is_ok());
        assert!(Curie::parse("my-onto:term/sub").is_ok());
        assert!(Curie::parse("ido/x:0000511").is_err());
        assert!(Curie::parse("ido:/0000511").is_err());
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        for input in ["", ":", "ido:", ":0000511", "ido: 0000511", " ido:0000511"] {
            assert!(
                Curie::parse(input).is_err(),
                "'{}' should not parse as a CURIE",
                input
            );
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let curie: Curie = serde_json::from_str("\"ncbitaxon:10090\"").unwrap();
        assert_eq!(curie.prefix(), "ncbitaxon");

        let bad: std::result::Result<Curie, _> = serde_json::from_str("\"ncbitaxon\"");
        assert!(bad.is_err());
    }
}
