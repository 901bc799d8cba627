use anyhow::Result;

use dkg_client::models::GroundRequest;
use dkg_client::render::{OutputFormat, ResultFormatter};
use dkg_client::KnowledgeGraphApi;

/// Runs the ground command and returns the rendered candidates
pub async fn run(
    api: &dyn KnowledgeGraphApi,
    text: &str,
    namespaces: &[String],
    format: OutputFormat,
) -> Result<String> {
    tracing::info!("Grounding: {}", text);

    let mut request = GroundRequest::new(text);
    if !namespaces.is_empty() {
        request = request.with_namespaces(namespaces.iter().cloned());
    }

    let results = api.ground(&request).await?;
    if results.is_empty() {
        eprintln!("No ontology terms matched '{}'. Try a shorter or more general phrase.", text);
    }

    ResultFormatter::new(format).format_grounding(&results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeGraph;

    #[tokio::test]
    async fn test_ground_text_output() {
        let output = run(&FakeGraph, "infected population", &[], OutputFormat::Text)
            .await
            .unwrap();
        assert!(output.starts_with("1. apollosv:00000233 infected population"));
        assert!(output.contains("score=0.76"));
    }

    #[tokio::test]
    async fn test_ground_no_match() {
        let output = run(&FakeGraph, "nothing", &[], OutputFormat::Text)
            .await
            .unwrap();
        assert_eq!(output, "No grounding matches found");
    }
}
