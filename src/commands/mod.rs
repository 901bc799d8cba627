pub mod entity;
pub mod ground;
pub mod relations;
pub mod search;

use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

use dkg_client::config::{ClientConfig, ConfigSources, DEFAULT_TIMEOUT};
use dkg_client::{resolve_base_url, WebClient};

/// Build a client from the command line, environment and config file
pub fn connect(api_url: Option<&str>, timeout_secs: Option<u64>) -> Result<WebClient> {
    let mut config = match resolve_base_url(api_url, None, None) {
        Some(base_url) => {
            // The URL is settled; the file only contributes its timeout
            let timeout = match ConfigSources::from_environment() {
                Ok(sources) => sources.timeout(),
                Err(e) => {
                    warn!("Ignoring config file: {}", e);
                    DEFAULT_TIMEOUT
                }
            };
            ClientConfig::new(base_url).with_timeout(timeout)
        }
        None => ConfigSources::from_environment()?.resolve(None)?,
    };
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    info!("Using knowledge graph service at {}", config.base_url);
    Ok(WebClient::new(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // The only test in this binary that touches the environment
    #[test]
    fn test_connect_with_url_survives_broken_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = [unterminated").unwrap();
        std::env::set_var("DKG_CONFIG", file.path());
        std::env::remove_var("DKG_REST_URL");

        let client = connect(Some("http://127.0.0.1:8771/"), Some(3)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8771/");

        let err = connect(None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    use dkg_client::models::{
        Entity, EntityKind, FullPredicate, FullRelationResponse, GroundRequest, GroundingResult,
        GroundingResults, LexicalEntry, Predicate, RelationQuery, RelationResponse,
    };
    use dkg_client::{Curie, DkgError, KnowledgeGraphApi, Result};

    /// In-memory stand-in for the knowledge graph service
    pub struct FakeGraph;

    fn entity(id: &str, name: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: Some(name.to_string()),
            kind: EntityKind::Class,
            obsolete: false,
            description: None,
            synonyms: vec![],
            alts: vec![],
            xrefs: vec![],
            labels: vec![],
            properties: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    #[async_trait]
    impl KnowledgeGraphApi for FakeGraph {
        async fn ground(&self, request: &GroundRequest) -> Result<GroundingResults> {
            if request.text != "infected population" {
                return Ok(vec![]);
            }
            Ok(vec![GroundingResult {
                url: "http://purl.obolibrary.org/obo/APOLLO_SV_00000233".to_string(),
                score: 0.76,
                prefix: "apollosv".to_string(),
                identifier: "00000233".to_string(),
                curie: "apollosv:00000233".to_string(),
                name: "infected population".to_string(),
                status: "name".to_string(),
            }])
        }

        async fn get_entity(&self, curie: &str) -> Result<Entity> {
            let curie = Curie::parse(curie)?;
            if curie.to_string() == "ido:0000511" {
                Ok(entity("ido:0000511", "infected population"))
            } else {
                Err(DkgError::NotFound(curie.to_string()))
            }
        }

        async fn get_relations(&self, query: &RelationQuery) -> Result<Vec<RelationResponse>> {
            query.validate()?;
            Ok(["vo:0004301", "vo:0005143", "vo:0005143"]
                .iter()
                .map(|subject| RelationResponse {
                    subject: subject.to_string(),
                    predicate: Predicate::Single("vo:0001243".to_string()),
                    object: query.target_curie.clone(),
                })
                .collect())
        }

        async fn get_relations_full(
            &self,
            query: &RelationQuery,
        ) -> Result<Vec<FullRelationResponse>> {
            query.validate()?;
            Ok(vec![FullRelationResponse {
                subject: entity("vo:0005143", "Brucella abortus vaccine strain"),
                predicate: FullPredicate::Single(BTreeMap::new()),
                object: entity("ncbitaxon:10090", "Mus musculus"),
            }])
        }

        async fn search(&self, _text: &str, _limit: u32, _offset: u32) -> Result<Vec<Entity>> {
            Ok(vec![entity("ido:0000511", "infected population")])
        }

        async fn get_lexical(&self) -> Result<Vec<LexicalEntry>> {
            Ok(vec![])
        }
    }
}
