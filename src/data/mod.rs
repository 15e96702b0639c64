//! Clients for the upstream SDMX service.
//!
//! Both clients follow the same pattern: one blocking GET per document,
//! serde deserialization into tolerant response types, and flattening into
//! domain catalogs/records. The JSON endpoints mirror the XML ones
//! element-for-element, with the XML-derived convention that a single child
//! is an object while repeated children are arrays; [`OneOrMany`] absorbs
//! that, and [`TextNode`] absorbs plain vs. `#text`-tagged text elements.

pub mod compact;
pub mod structure;

pub use compact::DataClient;
pub use structure::StructureClient;

use serde::Deserialize;

use crate::error::ExtractError;

/// Service root for the SDMX JSON endpoints.
pub const DEFAULT_BASE_URL: &str = "http://dataservices.imf.org/REST/SDMX_JSON.svc";

/// Issue one blocking GET and deserialize the JSON body.
pub(crate) fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<T, ExtractError> {
    let resp = client
        .get(url)
        .send()
        .map_err(|e| ExtractError::fetch(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ExtractError::fetch(url, format!("HTTP status {status}")));
    }

    resp.json::<T>().map_err(|e| ExtractError::parse(url, e))
}

/// A child element that may be absent, a single object, or an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// An SDMX text element: either a bare string or `{"#text": ..., "@xml:lang": ...}`,
/// possibly repeated once per language.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextNode {
    Plain(String),
    Tagged(TaggedText),
    PerLanguage(Vec<TaggedText>),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TaggedText {
    #[serde(rename = "#text", default)]
    text: String,
}

impl TextNode {
    /// First available rendering, or empty.
    pub(crate) fn into_text(self) -> String {
        match self {
            TextNode::Plain(text) => text,
            TextNode::Tagged(tagged) => tagged.text,
            TextNode::PerLanguage(list) => {
                list.into_iter().next().map(|t| t.text).unwrap_or_default()
            }
        }
    }
}

/// Flatten an optional text element to a plain string.
pub(crate) fn text_or_empty(node: Option<TextNode>) -> String {
    node.map(TextNode::into_text).unwrap_or_default()
}
