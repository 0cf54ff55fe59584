use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_page_language() -> String {
    "en".to_string()
}

/// Static CMS page. (slug, language) is unique, so "about-us" can exist once
/// per language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    pub id: String,
    pub slug: String, // e.g. "about-us"
    #[serde(default = "default_page_language")]
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub content: String, // Rich text HTML
    #[serde(default)]
    pub images: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(slug: &str, language: &str, title: &str) -> Self {
        Page {
            id: Uuid::new_v4().to_string(),
            slug: slug.to_string(),
            language: language.to_string(),
            title: title.to_string(),
            content: String::new(),
            images: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}
