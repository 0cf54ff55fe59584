use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PreviousPaper {
    pub id: String,
    pub title: String, // e.g. "General Studies Paper I"
    pub pdf_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    pub category_key: String,
    pub subcategory_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>, // YYYY-MM, drives the archives widget

    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub download_count: i64,

    pub created_at: DateTime<Utc>,
}

impl PreviousPaper {
    pub fn new(title: &str, pdf_url: &str, category_key: &str, subcategory_id: &str) -> Self {
        PreviousPaper {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            pdf_url: pdf_url.to_string(),
            logo: None,
            category_key: category_key.to_string(),
            subcategory_id: subcategory_id.to_string(),
            month: None,
            is_paid: false,
            download_count: 0,
            created_at: Utc::now(),
        }
    }
}
