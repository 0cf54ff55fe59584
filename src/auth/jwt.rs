use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    auth::claims::{Claims, RefreshClaims},
    errors::{AppError, AppResult},
    models::domain::user::User,
};

/// Issues and checks the portal's access and refresh tokens. Both are signed
/// with the same HS256 secret; refresh tokens are distinguished by their
/// `token_type` claim, so an access token can never be replayed as a refresh
/// token.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
    refresh_expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64, refresh_expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
            refresh_expiration_hours,
        }
    }

    fn sign<C: Serialize>(&self, claims: &C) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("token signing failed: {}", e)))
    }

    pub fn create_token(&self, user: &User) -> AppResult<String> {
        self.sign(&Claims::new(user, self.expiration_hours))
    }

    pub fn create_refresh_token(&self, user_id: &str) -> AppResult<String> {
        self.sign(&RefreshClaims::new(user_id, self.refresh_expiration_hours))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    pub fn validate_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let data =
            decode::<RefreshClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "Refresh token has expired".to_string(),
                    _ => format!("Refresh token rejected: {}", e),
                };
                AppError::Unauthorized(reason)
            })?;

        if data.claims.token_type != "refresh" {
            return Err(AppError::Unauthorized(
                "Token is not a refresh token".to_string(),
            ));
        }

        Ok(data.claims)
    }

    pub fn refresh_expiration_hours(&self) -> i64 {
        self.refresh_expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::domain::user::UserRole;

    fn service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 168)
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt_service = service();
        let user = User::test_user("john@example.com");

        let token = jwt_service.create_token(&user).unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::User);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = service().validate_token("not.a.jwt");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let jwt_service = service();

        let refresh_token = jwt_service.create_refresh_token("user-1").unwrap();
        let claims = jwt_service.validate_refresh_token(&refresh_token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn test_access_token_is_not_a_refresh_token() {
        let jwt_service = service();
        let user = User::test_user("john@example.com");

        let access = jwt_service.create_token(&user).unwrap();
        assert!(jwt_service.validate_refresh_token(&access).is_err());
    }
}
