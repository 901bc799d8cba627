use anyhow::Result;
use serde::Serialize;

use crate::models::{Entity, FullRelationResponse, GroundingResult, RelationResponse};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
    Csv,
}

/// Renders knowledge graph results for display
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format grounding candidates in service order
    pub fn format_grounding(&self, results: &[GroundingResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(results),
            OutputFormat::Text => {
                if results.is_empty() {
                    return Ok("No grounding matches found".to_string());
                }
                let mut out = String::new();
                for (rank, r) in results.iter().enumerate() {
                    out.push_str(&format!(
                        "{}. {} {} ({}) score={:.2} [{}]\n",
                        rank + 1,
                        r.curie,
                        r.name,
                        r.url,
                        r.score,
                        r.status
                    ));
                }
                Ok(out)
            }
            OutputFormat::Csv => {
                let rows = results.iter().map(|r| {
                    vec![
                        r.curie.clone(),
                        r.prefix.clone(),
                        r.identifier.clone(),
                        r.name.clone(),
                        format!("{}", r.score),
                        r.status.clone(),
                        r.url.clone(),
                    ]
                });
                Ok(to_csv(
                    &["curie", "prefix", "identifier", "name", "score", "status", "url"],
                    rows,
                ))
            }
        }
    }

    /// Format a single entity record
    pub fn format_entity(&self, entity: &Entity) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(entity),
            OutputFormat::Csv => self.format_entities(std::slice::from_ref(entity)),
            OutputFormat::Text => {
                let mut out = format!("{} ({})\n", entity.display_name(), entity.id);
                out.push_str(&format!("  type: {}\n", entity.kind));
                if entity.obsolete {
                    out.push_str("  obsolete: true\n");
                }
                if let Some(description) = &entity.description {
                    out.push_str(&format!("  description: {}\n", description));
                }
                push_list(&mut out, "synonyms", entity.synonym_values());
                push_list(&mut out, "alts", entity.alts.iter().map(String::as_str));
                push_list(&mut out, "xrefs", entity.xrefs.iter().map(|x| x.id.as_str()));
                push_list(&mut out, "labels", entity.labels.iter().map(String::as_str));
                for (key, values) in &entity.properties {
                    out.push_str(&format!("  {}: {}\n", key, values.join(", ")));
                }
                for (key, value) in &entity.extra {
                    out.push_str(&format!("  {}: {}\n", key, value));
                }
                Ok(out)
            }
        }
    }

    /// Format a list of entities, e.g. search results
    pub fn format_entities(&self, entities: &[Entity]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(entities),
            OutputFormat::Text => {
                if entities.is_empty() {
                    return Ok("No entities found".to_string());
                }
                let mut out = String::new();
                for entity in entities {
                    out.push_str(&format!("{} ({})", entity.display_name(), entity.id));
                    if entity.obsolete {
                        out.push_str(" [obsolete]");
                    }
                    out.push('\n');
                }
                Ok(out)
            }
            OutputFormat::Csv => {
                let rows = entities.iter().map(|e| {
                    vec![
                        e.id.clone(),
                        e.name.clone().unwrap_or_default(),
                        e.kind.to_string(),
                        e.obsolete.to_string(),
                        e.description.clone().unwrap_or_default(),
                    ]
                });
                Ok(to_csv(&["id", "name", "type", "obsolete", "description"], rows))
            }
        }
    }

    /// Format triples; duplicates are printed as returned
    pub fn format_relations(&self, relations: &[RelationResponse]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(relations),
            OutputFormat::Text => {
                if relations.is_empty() {
                    return Ok("No relations found".to_string());
                }
                let mut out = String::new();
                for r in relations {
                    out.push_str(&format!("{} --[{}]--> {}\n", r.subject, r.predicate, r.object));
                }
                Ok(out)
            }
            OutputFormat::Csv => {
                let rows = relations
                    .iter()
                    .map(|r| vec![r.subject.clone(), r.predicate.to_string(), r.object.clone()]);
                Ok(to_csv(&["subject", "predicate", "object"], rows))
            }
        }
    }

    pub fn format_full_relations(&self, relations: &[FullRelationResponse]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(relations),
            OutputFormat::Text => {
                if relations.is_empty() {
                    return Ok("No relations found".to_string());
                }
                let mut out = String::new();
                for r in relations {
                    out.push_str(&format!(
                        "{} ({}) --> {} ({})\n",
                        r.subject.display_name(),
                        r.subject.id,
                        r.object.display_name(),
                        r.object.id
                    ));
                }
                Ok(out)
            }
            OutputFormat::Csv => {
                let rows = relations.iter().map(|r| {
                    vec![
                        r.subject.id.clone(),
                        r.subject.name.clone().unwrap_or_default(),
                        r.object.id.clone(),
                        r.object.name.clone().unwrap_or_default(),
                    ]
                });
                Ok(to_csv(
                    &["subject", "subject_name", "object", "object_name"],
                    rows,
                ))
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn push_list<'a>(out: &mut String, label: &str, values: impl Iterator<Item = &'a str>) {
    let values: Vec<&str> = values.collect();
    if !values.is_empty() {
        out.push_str(&format!("  {}: {}\n", label, values.join(", ")));
    }
}

fn to_csv(header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityKind, Predicate};
    use std::collections::BTreeMap;

    fn entity() -> Entity {
        Entity {
            id: "ido:0000511".to_string(),
            name: Some("infected population".to_string()),
            kind: EntityKind::Class,
            obsolete: false,
            description: Some("An organism population, all infected.".to_string()),
            synonyms: vec![],
            alts: vec![],
            xrefs: vec![],
            labels: vec!["ido".to_string()],
            properties: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    fn relations() -> Vec<RelationResponse> {
        ["vo:0005143", "vo:0005143"]
            .iter()
            .map(|s| RelationResponse {
                subject: s.to_string(),
                predicate: Predicate::Single("vo:0001243".to_string()),
                object: "ncbitaxon:10090".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_format_entity_text() {
        let formatter = ResultFormatter::new(OutputFormat::Text);
        let text = formatter.format_entity(&entity()).unwrap();

        assert!(text.starts_with("infected population (ido:0000511)"));
        assert!(text.contains("type: class"));
        assert!(text.contains("labels: ido"));
        assert!(!text.contains("obsolete"));
    }

    #[test]
    fn test_format_entities_csv_escapes() {
        let formatter = ResultFormatter::new(OutputFormat::Csv);
        let csv = formatter.format_entities(&[entity()]).unwrap();

        assert!(csv.starts_with("id,name,type,obsolete,description\n"));
        assert!(csv.contains(
            "ido:0000511,infected population,class,false,\"An organism population, all infected.\""
        ));
    }

    #[test]
    fn test_format_relations_keeps_duplicates() {
        let formatter = ResultFormatter::new(OutputFormat::Text);
        let text = formatter.format_relations(&relations()).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("vo:0005143 --[vo:0001243]--> ncbitaxon:10090"));
    }

    #[test]
    fn test_format_json_round_trips_relations() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let json = formatter.format_relations(&relations()).unwrap();

        let parsed: Vec<RelationResponse> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, relations());
    }

    #[test]
    fn test_empty_results() {
        let formatter = ResultFormatter::new(OutputFormat::Text);

        assert_eq!(
            formatter.format_grounding(&[]).unwrap(),
            "No grounding matches found"
        );
        assert_eq!(formatter.format_relations(&[]).unwrap(), "No relations found");
        assert_eq!(formatter.format_entities(&[]).unwrap(), "No entities found");
    }

    #[test]
    fn test_format_entity_text_shows_extra_fields() {
        let mut entity = entity();
        entity
            .extra
            .insert("physical_min".to_string(), serde_json::json!(0.0));

        let text = ResultFormatter::new(OutputFormat::Text)
            .format_entity(&entity)
            .unwrap();
        assert!(text.contains("  physical_min: 0.0\n"));
    }
}
