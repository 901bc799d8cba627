//! One-call helpers that resolve the service URL, build a client and perform a
//! single request. Use `WebClient` directly when making several calls.

use crate::client::WebClient;
use crate::curie::Curie;
use crate::error::Result;
use crate::models::{Entity, GroundingResults, RelationQuery, RelationResponse};

/// Ground free text to ranked ontology terms
pub async fn ground(text: &str, api_url: Option<&str>) -> Result<GroundingResults> {
    WebClient::from_env(api_url)?.ground(text).await
}

/// Fetch one entity by CURIE
pub async fn get_entity(curie: &str, api_url: Option<&str>) -> Result<Entity> {
    Curie::validate(curie)?;
    WebClient::from_env(api_url)?.get_entity(curie).await
}

/// Query triples matching a relation filter
pub async fn get_relations(
    query: &RelationQuery,
    api_url: Option<&str>,
) -> Result<Vec<RelationResponse>> {
    query.validate()?;
    WebClient::from_env(api_url)?.get_relations(query).await
}
