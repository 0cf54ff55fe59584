use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted so issued refresh tokens can be revoked server-side.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(token: &str, user_id: &str, expires_at: DateTime<Utc>, ip: Option<String>) -> Self {
        RefreshToken {
            token: token.to_string(),
            user_id: user_id.to_string(),
            expires_at,
            created_by_ip: ip,
            created_at: Utc::now(),
        }
    }
}
