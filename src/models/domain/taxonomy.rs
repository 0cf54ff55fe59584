use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level content bucket, keyed by a short slug like "upsc" or "cgl".
/// Every section (current affairs, quizzes, e-books, papers) keeps its own
/// category collection with this shape.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subcategory {
    pub id: String, // e.g. "upsc_ias"
    pub category_key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: &str, title: &str, logo: Option<String>, description: Option<String>) -> Self {
        Category {
            id: id.to_string(),
            title: title.to_string(),
            logo,
            description,
            created_at: Utc::now(),
        }
    }
}

impl Subcategory {
    pub fn new(
        id: &str,
        category_key: &str,
        title: &str,
        logo: Option<String>,
        description: Option<String>,
    ) -> Self {
        Subcategory {
            id: id.to_string(),
            category_key: category_key.to_string(),
            title: title.to_string(),
            logo,
            description,
            created_at: Utc::now(),
        }
    }
}
