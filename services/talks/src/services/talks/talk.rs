use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    pub title: String,
    pub presenter: String,
    pub summary: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Immutable view of the talks at a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalkSnapshot {
    pub version: u64,
    pub talks: Vec<Talk>,
}

impl TalkSnapshot {
    /// The entity tag of the snapshot as sent in the `ETag` header.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.version)
    }
}
