use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

pub const PASSWORD_ERROR_MSG: &str = "Password must be at least 8 characters long, contain at least one uppercase letter, and one special character.";

static UPPERCASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("UPPERCASE_RE is a valid regex pattern"));
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#)
        .expect("SPECIAL_RE is a valid regex pattern")
});

/// At least 8 chars, one uppercase letter, one special character.
pub fn validate_password_strength(password: &str) -> bool {
    password.len() >= 8 && UPPERCASE_RE.is_match(password) && SPECIAL_RE.is_match(password)
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Reset tokens are stored hashed; only the plain token goes into the email.
pub fn hash_reset_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength_accepts_strong_password() {
        assert!(validate_password_strength("Str0ng!pass"));
        assert!(validate_password_strength("Another#One1"));
    }

    #[test]
    fn test_password_strength_rejects_weak_passwords() {
        assert!(!validate_password_strength("short!A"));
        assert!(!validate_password_strength("nouppercase!1"));
        assert!(!validate_password_strength("NoSpecialChar1"));
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("Str0ng!pass").unwrap();

        assert!(verify_password("Str0ng!pass", &hash).unwrap());
        assert!(!verify_password("Wrong!pass1", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Str0ng!pass").unwrap();
        let b = hash_password("Str0ng!pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reset_token_hash_is_deterministic() {
        let a = hash_reset_token("token-123");
        let b = hash_reset_token("token-123");
        assert_eq!(a, b);
        assert_ne!(a, hash_reset_token("token-124"));
        assert_eq!(a.len(), 64);
    }
}
