use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

/// Gate for the admin surfaces (taxonomy CRUD, content CRUD, media, pages).
pub fn require_admin(claims: &Claims) -> AppResult<()> {
    match claims.role {
        UserRole::Admin => Ok(()),
        UserRole::User => Err(AppError::Unauthorized(
            "Admin role required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_role(role: UserRole) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            role,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_admin_passes_the_gate() {
        assert!(require_admin(&claims_with_role(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_regular_user_is_rejected() {
        let err = require_admin(&claims_with_role(UserRole::User)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
