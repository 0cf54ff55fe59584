use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::{User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub role: UserRole,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,        // user id
    pub token_type: String, // "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl RefreshClaims {
    pub fn new(user_id: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            token_type: "refresh".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Who is making a quiz submission. Guests are a first-class variant, not a
/// missing user id: the submit flow branches exhaustively on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    Guest,
    Authenticated(String),
}

impl CallerIdentity {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            CallerIdentity::Guest => None,
            CallerIdentity::Authenticated(user_id) => Some(user_id),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, CallerIdentity::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("jane@example.com");
        let claims = Claims::new(&user, 24);

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_claims_creation() {
        let refresh_claims = RefreshClaims::new("user-1", 168);

        assert_eq!(refresh_claims.sub, "user-1");
        assert_eq!(refresh_claims.token_type, "refresh");
        assert!(refresh_claims.exp > refresh_claims.iat);
    }

    #[test]
    fn test_caller_identity_variants() {
        assert!(CallerIdentity::Guest.is_guest());
        assert_eq!(CallerIdentity::Guest.user_id(), None);

        let auth = CallerIdentity::Authenticated("user-1".to_string());
        assert!(!auth.is_guest());
        assert_eq!(auth.user_id(), Some("user-1"));
    }
}
