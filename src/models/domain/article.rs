use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_article_language() -> String {
    "en".to_string()
}

/// Listing metadata only. The heavy HTML body lives in ArticleDetail so list
/// queries never drag it across the wire.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>, // Short summary for cards

    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>, // YYYY-MM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>, // International, Sports, ...

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub category_key: String,
    pub subcategory_id: String,

    #[serde(default = "default_article_language")]
    pub language: String, // "en"/"hi"/"te"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDetail {
    pub article_id: String,
    #[serde(default)]
    pub body: String, // Full HTML content from admin
    #[serde(default)]
    pub content_url: String, // Optional PDF URL
}

impl Article {
    pub fn new(title: &str, category_key: &str, subcategory_id: &str) -> Self {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            excerpt: None,
            date: now,
            month: None,
            scope: None,
            image: None,
            category_key: category_key.to_string(),
            subcategory_id: subcategory_id.to_string(),
            language: default_article_language(),
            author: None,
            created_at: now,
            updated_at: now,
        }
    }
}
