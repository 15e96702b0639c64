//! DataStructure client: code lists, concepts and key families.
//!
//! One GET per dataset returns the full structural description; it is
//! flattened into the three catalogs the rest of the system consumes. The
//! data pipeline only ever uses the code-list catalog (area codes and
//! names), but all three are extracted and persisted the same way.

use serde::Deserialize;
use tracing::info;

use crate::data::{DEFAULT_BASE_URL, OneOrMany, TextNode, get_json, text_or_empty};
use crate::domain::types::{CodeEntry, ConceptEntry, KeyFamilyComponent, StructureCatalog};
use crate::error::ExtractError;

/// Client for the DataStructure endpoint.
pub struct StructureClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl StructureClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch and flatten the structural description of `dataset`.
    pub fn fetch_catalog(&self, dataset: &str) -> Result<StructureCatalog, ExtractError> {
        let url = format!("{}/DataStructure/{dataset}", self.base_url);
        info!(%url, "fetching data structure");
        let envelope: StructureEnvelope = get_json(&self.client, &url)?;
        Ok(flatten(envelope))
    }
}

impl Default for StructureClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct StructureEnvelope {
    #[serde(rename = "Structure")]
    structure: StructureNode,
}

#[derive(Debug, Deserialize)]
struct StructureNode {
    #[serde(rename = "CodeLists", default)]
    code_lists: Option<CodeListsNode>,
    #[serde(rename = "Concepts", default)]
    concepts: Option<ConceptsNode>,
    #[serde(rename = "KeyFamilies", default)]
    key_families: Option<KeyFamiliesNode>,
}

#[derive(Debug, Deserialize)]
struct CodeListsNode {
    #[serde(rename = "CodeList", default)]
    lists: OneOrMany<CodeListNode>,
}

#[derive(Debug, Deserialize)]
struct CodeListNode {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "Name", default)]
    name: Option<TextNode>,
    #[serde(rename = "Code", default)]
    codes: OneOrMany<CodeNode>,
}

#[derive(Debug, Deserialize)]
struct CodeNode {
    #[serde(rename = "@value", default)]
    value: String,
    #[serde(rename = "Description", default)]
    description: Option<TextNode>,
}

// Concepts appear either directly under `Concepts` or nested in one or more
// `ConceptScheme` elements, depending on the dataset.
#[derive(Debug, Deserialize)]
struct ConceptsNode {
    #[serde(rename = "ConceptScheme", default)]
    schemes: OneOrMany<ConceptSchemeNode>,
    #[serde(rename = "Concept", default)]
    concepts: OneOrMany<ConceptNode>,
}

#[derive(Debug, Deserialize)]
struct ConceptSchemeNode {
    #[serde(rename = "Concept", default)]
    concepts: OneOrMany<ConceptNode>,
}

#[derive(Debug, Deserialize)]
struct ConceptNode {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "Name", default)]
    name: Option<TextNode>,
    #[serde(rename = "Description", default)]
    description: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
struct KeyFamiliesNode {
    #[serde(rename = "KeyFamily", default)]
    families: OneOrMany<KeyFamilyNode>,
}

#[derive(Debug, Deserialize)]
struct KeyFamilyNode {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "Name", default)]
    name: Option<TextNode>,
    #[serde(rename = "Components", default)]
    components: Option<ComponentsNode>,
}

#[derive(Debug, Deserialize)]
struct ComponentsNode {
    #[serde(rename = "Dimension", default)]
    dimensions: OneOrMany<ComponentNode>,
    #[serde(rename = "TimeDimension", default)]
    time_dimensions: OneOrMany<ComponentNode>,
    #[serde(rename = "PrimaryMeasure", default)]
    primary_measures: OneOrMany<ComponentNode>,
    #[serde(rename = "Attribute", default)]
    attributes: OneOrMany<ComponentNode>,
}

#[derive(Debug, Deserialize)]
struct ComponentNode {
    #[serde(rename = "@conceptRef", default)]
    concept_ref: String,
}

fn flatten(envelope: StructureEnvelope) -> StructureCatalog {
    let structure = envelope.structure;
    let mut catalog = StructureCatalog::default();

    if let Some(node) = structure.code_lists {
        for list in node.lists.into_vec() {
            let list_name = text_or_empty(list.name);
            for code in list.codes.into_vec() {
                catalog.code_lists.push(CodeEntry {
                    list_id: list.id.clone(),
                    list_name: list_name.clone(),
                    value: code.value,
                    description: text_or_empty(code.description),
                });
            }
        }
    }

    if let Some(node) = structure.concepts {
        let mut concepts = node.concepts.into_vec();
        for scheme in node.schemes.into_vec() {
            concepts.extend(scheme.concepts.into_vec());
        }
        for concept in concepts {
            catalog.concepts.push(ConceptEntry {
                id: concept.id,
                name: text_or_empty(concept.name),
                description: text_or_empty(concept.description),
            });
        }
    }

    if let Some(node) = structure.key_families {
        for family in node.families.into_vec() {
            let family_name = text_or_empty(family.name);
            let Some(components) = family.components else {
                continue;
            };
            let mut push = |component_type: &str, nodes: OneOrMany<ComponentNode>| {
                for component in nodes.into_vec() {
                    catalog.key_families.push(KeyFamilyComponent {
                        family_id: family.id.clone(),
                        family_name: family_name.clone(),
                        component_type: component_type.to_string(),
                        concept_ref: component.concept_ref,
                    });
                }
            };
            push("Dimension", components.dimensions);
            push("TimeDimension", components.time_dimensions);
            push("PrimaryMeasure", components.primary_measures);
            push("Attribute", components.attributes);
        }
    }

    catalog
}
