use anyhow::Result;

use dkg_client::render::{OutputFormat, ResultFormatter};
use dkg_client::{DkgError, KnowledgeGraphApi};

/// Runs the entity command; an unknown CURIE yields a notice instead of an error
pub async fn run(api: &dyn KnowledgeGraphApi, curie: &str, format: OutputFormat) -> Result<String> {
    tracing::info!("Looking up entity: {}", curie);

    match api.get_entity(curie).await {
        Ok(entity) => {
            if entity.obsolete {
                eprintln!("Note: {} is marked obsolete", entity.id);
            }
            ResultFormatter::new(format).format_entity(&entity)
        }
        Err(DkgError::NotFound(curie)) => {
            eprintln!("\nNo entity found. Here are some tips:");
            eprintln!(" - Check the prefix and local identifier, e.g. ido:0000511");
            eprintln!(" - Use `dkg ground <text>` to find identifiers by name");
            Ok(format!("No entity found for {}", curie))
        }
        Err(e) => Err(e.into()),
    }
}
