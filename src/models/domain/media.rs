use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Pdf,
    Video,
    Other,
}

/// Bookkeeping record for an uploaded asset. The bytes themselves live
/// wherever the upload pipeline put them; we only track the URL.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Media {
    pub id: String,
    pub kind: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>, // user id
    pub created_at: DateTime<Utc>,
}

impl Media {
    pub fn new(kind: MediaKind, url: &str, uploaded_by: Option<String>) -> Self {
        Media {
            id: Uuid::new_v4().to_string(),
            kind,
            url: url.to_string(),
            filename: None,
            size: None,
            meta: None,
            uploaded_by,
            created_at: Utc::now(),
        }
    }
}
