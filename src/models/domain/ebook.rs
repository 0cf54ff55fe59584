use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_languages() -> Vec<String> {
    vec!["English".to_string()]
}

fn default_validity() -> String {
    "NA".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ebook {
    pub id: String,
    pub title: String, // Unique across the collection

    pub category_key: String,
    pub subcategory_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub pdf_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // A book can exist in several languages, e.g. ["English", "Telugu"]
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default = "default_validity")]
    pub validity: String,

    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub download_count: i64,

    pub created_at: DateTime<Utc>,
}

impl Ebook {
    pub fn new(title: &str, category_key: &str, subcategory_id: &str, pdf_url: &str) -> Self {
        Ebook {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            category_key: category_key.to_string(),
            subcategory_id: subcategory_id.to_string(),
            thumbnail: None,
            pdf_url: pdf_url.to_string(),
            description: None,
            languages: default_languages(),
            validity: default_validity(),
            is_paid: false,
            download_count: 0,
            created_at: Utc::now(),
        }
    }
}
