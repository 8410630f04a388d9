use serde::{Deserialize, Serialize};

/// One stylistic rendition of the user's CV returned by the provider.
///
/// All four fields are required; a missing one fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvVersion {
    pub title: String,
    /// One-sentence rationale for the style.
    pub description: String,
    /// Markup fragment without `<html>`/`<body>` wrappers.
    pub html_content: String,
    /// Display key. Expected unique per response but not enforced.
    pub style_slug: String,
}

/// The provider's answer, versions kept in the order returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub versions: Vec<CvVersion>,
}

impl GenerationResult {
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CvVersion> {
        self.versions.get(index)
    }
}
