//! Web-grounding metadata and the citations derived from it.

use serde::{Deserialize, Serialize};

/// Grounding metadata attached to a web-searched response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding chunk. Only web chunks produce citations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// A web source cited by a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// One citation per web chunk, in chunk order. Duplicates are kept.
pub fn extract_citations(metadata: Option<&GroundingMetadata>) -> Vec<Citation> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Citation {
            uri: web.uri.clone(),
            title: web.title.clone(),
        })
        .collect()
}
