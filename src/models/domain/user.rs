use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,

    // Argon2 PHC string. Never exposed through the API; responses go through
    // UserDto which does not carry it.
    pub password_hash: String,

    pub role: UserRole,

    pub gender: String,
    pub phone_number: String,
    pub dob: String,
    pub state: String,
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_token: Option<String>, // sha-256 hex of the mailed token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_expires: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        gender: &str,
        phone_number: &str,
        dob: &str,
        state: &str,
        address: &str,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            gender: gender.to_string(),
            phone_number: phone_number.to_string(),
            dob: dob.to_string(),
            state: state.to_string(),
            address: address.to_string(),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(email: &str) -> Self {
        User::new(
            "Test User",
            email,
            "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$aGFzaA",
            UserRole::User,
            "other",
            "9999999999",
            "1990-01-01",
            "Telangana",
            "1 Test Street",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::test_user("jane@example.com");

        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, UserRole::User);
        assert!(user.reset_password_token.is_none());
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
    }
}
