use anyhow::Result;

use dkg_client::render::{OutputFormat, ResultFormatter};
use dkg_client::KnowledgeGraphApi;

pub async fn run(
    api: &dyn KnowledgeGraphApi,
    text: &str,
    limit: u32,
    offset: u32,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!("Searching entities: {} (limit {}, offset {})", text, limit, offset);

    let entities = api.search(text, limit, offset).await?;
    ResultFormatter::new(format).format_entities(&entities)
}
