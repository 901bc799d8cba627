use anyhow::Result;

use dkg_client::models::{RelationDirection, RelationQuery};
use dkg_client::render::{OutputFormat, ResultFormatter};
use dkg_client::KnowledgeGraphApi;

/// Command line options for a relation query
#[derive(Debug, Default)]
pub struct RelationOptions {
    pub relations: Vec<String>,
    pub source: Option<String>,
    pub direction: Option<RelationDirection>,
    pub limit: Option<u32>,
    pub max_hops: Option<u32>,
    pub distinct: bool,
    pub full: bool,
}

impl RelationOptions {
    fn to_query(&self, target: &str) -> RelationQuery {
        let mut query = RelationQuery::new(target).with_relations(self.relations.iter().cloned());
        if let Some(source) = &self.source {
            query = query.with_source(source.clone());
        }
        if let Some(direction) = self.direction {
            query = query.with_direction(direction);
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(max_hops) = self.max_hops {
            query.relation_max_hops = Some(max_hops);
        }
        if self.distinct {
            query = query.distinct();
        }
        query
    }
}

/// Runs the relations command and returns the rendered triples
pub async fn run(
    api: &dyn KnowledgeGraphApi,
    target: &str,
    options: &RelationOptions,
    format: OutputFormat,
) -> Result<String> {
    let query = options.to_query(target);
    tracing::info!(
        "Querying relations to {} ({} relation filters)",
        target,
        query.relations.len()
    );

    let formatter = ResultFormatter::new(format);
    if options.full {
        let relations = api.get_relations_full(&query).await?;
        formatter.format_full_relations(&relations)
    } else {
        let relations = api.get_relations(&query).await?;
        formatter.format_relations(&relations)
    }
}
