// Client library for a domain knowledge graph REST service
pub mod client;
pub mod config;
pub mod curie;
pub mod error;
pub mod models;
pub mod render;
pub mod web;

// Re-export core types for convenience
pub use client::{KnowledgeGraphApi, WebClient};
pub use config::{resolve_base_url, ClientConfig};
pub use curie::Curie;
pub use error::{DkgError, Result};
pub use web::{get_entity, get_relations, ground};
