use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

use super::KnowledgeGraphApi;
use crate::config::ClientConfig;
use crate::curie::Curie;
use crate::error::{DkgError, Result};
use crate::models::{
    Entity, FullRelationResponse, GroundRequest, GroundResponse, GroundingResults, LexicalEntry,
    RelationQuery, RelationResponse,
};

/// Page size used by `search` when the caller has no preference
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

/// Longest response body quoted in error messages
const MAX_ERROR_BODY: usize = 200;

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    limit: u32,
    offset: u32,
}

/// HTTP client for the domain knowledge graph REST API
#[derive(Debug, Clone)]
pub struct WebClient {
    base: Url,
    http: Client,
}

impl WebClient {
    /// Create a client for the configured service
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| DkgError::ConfigurationInvalid {
            origin: config.base_url.clone(),
            message: format!("not a valid URL: {}", e),
        })?;
        if base.cannot_be_a_base() {
            return Err(DkgError::ConfigurationInvalid {
                origin: config.base_url,
                message: "URL cannot carry a path".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DkgError::unavailable(base.as_str(), e))?;

        Ok(Self { base, http })
    }

    /// Create a client with the URL taken from `explicit`, `DKG_REST_URL` or the config file
    pub fn from_env(explicit: Option<&str>) -> Result<Self> {
        Self::new(ClientConfig::resolve(explicit)?)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Ground free text against every namespace
    pub async fn ground(&self, text: &str) -> Result<GroundingResults> {
        self.ground_request(&GroundRequest::new(text)).await
    }

    /// Ground free text, optionally restricted to some namespaces
    pub async fn ground_request(&self, request: &GroundRequest) -> Result<GroundingResults> {
        if request.text.trim().is_empty() {
            return Err(DkgError::InvalidRequest(
                "grounding text must not be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["ground"]);
        let body = self.send(self.http.post(url.clone()).json(request), &url).await?;
        let body = check_status(&url, body)?;
        let response: GroundResponse = parse_json(&url, &body)?;

        response
            .validate()
            .map_err(|message| DkgError::invalid_response(url.as_str(), message))?;

        debug!(
            "Grounded '{}' to {} candidates",
            request.text,
            response.results.len()
        );
        Ok(response.results)
    }

    /// Ground several texts concurrently, one result per text in input order
    pub async fn ground_batch(&self, texts: &[&str]) -> Vec<Result<GroundingResults>> {
        join_all(texts.iter().map(|text| self.ground(text))).await
    }

    /// Fetch the full record of one entity
    pub async fn get_entity(&self, curie: &str) -> Result<Entity> {
        let curie = Curie::parse(curie)?.to_string();
        let url = self.endpoint(&["entity", curie.as_str()]);

        let (status, body) = self.send(self.http.get(url.clone()), &url).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(DkgError::NotFound(curie));
        }
        let body = check_status(&url, (status, body))?;

        // The service answers `null` with 200 for unknown identifiers
        let entity: Option<Entity> = parse_json(&url, &body)?;
        entity.ok_or(DkgError::NotFound(curie))
    }

    /// Triples incident to the query's anchor, in service order with duplicates kept
    pub async fn get_relations(&self, query: &RelationQuery) -> Result<Vec<RelationResponse>> {
        let mut query = query.clone();
        query.full = false;
        self.post_relations(&query).await
    }

    pub async fn get_relations_full(
        &self,
        query: &RelationQuery,
    ) -> Result<Vec<FullRelationResponse>> {
        let mut query = query.clone();
        query.full = true;
        self.post_relations(&query).await
    }

    async fn post_relations<T: DeserializeOwned>(&self, query: &RelationQuery) -> Result<Vec<T>> {
        query.validate()?;

        let url = self.endpoint(&["relations"]);
        let body = self.send(self.http.post(url.clone()).json(query), &url).await?;
        let body = check_status(&url, body)?;
        let relations: Vec<T> = parse_json(&url, &body)?;

        debug!(
            "Found {} relations for {}",
            relations.len(),
            query.target_curie
        );
        Ok(relations)
    }

    /// Search entity names and synonyms
    pub async fn search(&self, text: &str, limit: u32, offset: u32) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Err(DkgError::InvalidRequest(
                "search text must not be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["search"]);
        let params = SearchParams {
            q: text,
            limit,
            offset,
        };
        let body = self
            .send(self.http.get(url.clone()).query(&params), &url)
            .await?;
        let body = check_status(&url, body)?;
        parse_json(&url, &body)
    }

    /// Name, synonyms and description of every entity in the graph
    pub async fn get_lexical(&self) -> Result<Vec<LexicalEntry>> {
        let url = self.endpoint(&["lexical"]);
        let body = self.send(self.http.get(url.clone()), &url).await?;
        let body = check_status(&url, body)?;
        parse_json(&url, &body)
    }

    /// Build `<base>/api/<segments...>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<(StatusCode, String)> {
        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| DkgError::unavailable(url.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DkgError::unavailable(url.as_str(), e))?;

        debug!("{} -> {} in {:?}", url, status, started.elapsed());
        Ok((status, body))
    }
}

fn check_status(url: &Url, (status, body): (StatusCode, String)) -> Result<String> {
    if status.is_success() {
        return Ok(body);
    }

    warn!("Request to {} failed with {}", url, status);
    let message = truncate(&body);
    if status.is_server_error() {
        Err(DkgError::ServiceUnavailable {
            url: url.to_string(),
            message: format!("HTTP {}: {}", status, message),
        })
    } else {
        Err(DkgError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn parse_json<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| DkgError::invalid_response(url.as_str(), e.to_string()))
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl KnowledgeGraphApi for WebClient {
    async fn ground(&self, request: &GroundRequest) -> Result<GroundingResults> {
        self.ground_request(request).await
    }

    async fn get_entity(&self, curie: &str) -> Result<Entity> {
        WebClient::get_entity(self, curie).await
    }

    async fn get_relations(&self, query: &RelationQuery) -> Result<Vec<RelationResponse>> {
        WebClient::get_relations(self, query).await
    }

    async fn get_relations_full(
        &self,
        query: &RelationQuery,
    ) -> Result<Vec<FullRelationResponse>> {
        WebClient::get_relations_full(self, query).await
    }

    async fn search(&self, text: &str, limit: u32, offset: u32) -> Result<Vec<Entity>> {
        WebClient::search(self, text, limit, offset).await
    }

    async fn get_lexical(&self) -> Result<Vec<LexicalEntry>> {
        WebClient::get_lexical(self).await
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let client = WebClient::new(ClientConfig::new("http://localhost:8771/")).unwrap();
        assert_eq!(
            client.endpoint(&["entity", "ido:0000511"]).as_str(),
            "http://localhost:8771/api/entity/ido:0000511"
        );

        let client = WebClient::new(ClientConfig::new("http://localhost:8771/dkg")).unwrap();
        assert_eq!(
            client.endpoint(&["ground"]).as_str(),
            "http://localhost:8771/dkg/api/ground"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = WebClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, DkgError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(MAX_ERROR_BODY * 2);
        assert_eq!(truncate(&long).len(), MAX_ERROR_BODY + 3);
        assert_eq!(truncate(" short "), "short");
    }
}
