mod rest;


pub use rest::{WebClient, DEFAULT_SEARCH_LIMIT};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Entity, FullRelationResponse, GroundRequest, GroundingResults, LexicalEntry, RelationQuery,
    RelationResponse,
};

/// Operations offered by a domain knowledge graph service
#[async_trait]
pub trait KnowledgeGraphApi: Send + Sync {
    /// Ground free text to ranked ontology terms
    async fn ground(&self, request: &GroundRequest) -> Result<GroundingResults>;

    /// Look up one entity by CURIE
    async fn get_entity(&self, curie: &str) -> Result<Entity>;

    /// Triples matching a relation filter
    async fn get_relations(&self, query: &RelationQuery) -> Result<Vec<RelationResponse>>;

    /// Triples with full entity records on both ends
    async fn get_relations_full(&self, query: &RelationQuery)
        -> Result<Vec<FullRelationResponse>>;

    /// Entities whose name or synonyms match the text
    async fn search(&self, text: &str, limit: u32, offset: u32) -> Result<Vec<Entity>>;

    async fn get_lexical(&self) -> Result<Vec<LexicalEntry>>;
}
