use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

impl Blog {
    /// Substring match on title or content. `needle` must already be
    /// lowercased; both sides fold with Unicode `to_lowercase`.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Body of `POST /blogs/create`. Every field is optional on the wire so that
/// a missing one can be answered with the fixed client error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
}

/// Body of `POST /blogs/save`.
#[derive(Debug, Default, Deserialize)]
pub struct SaveBlogRequest {
    pub id: Option<BlogId>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Form bodies carry the id as text, JSON bodies usually as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BlogId {
    Number(i64),
    Text(String),
}

impl BlogId {
    pub fn parse(&self) -> Option<i64> {
        match self {
            Self::Number(id) => Some(*id),
            Self::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogsResponse {
    pub blogs: Vec<Blog>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CreatedBlogResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Empty strings count as absent, the same as a missing field.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
