use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    auth::{
        password::{
            hash_password, hash_reset_token, validate_password_strength, verify_password,
            PASSWORD_ERROR_MSG,
        },
        JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{
            user::{User, UserRole},
            RefreshToken,
        },
        dto::{
            request::{
                ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
                ResetPasswordRequest,
            },
            response::{LoginResponse, UserDto},
        },
    },
    repositories::{RefreshTokenRepository, UserRepository},
    services::email::Mailer,
};

// Same response whether or not the account exists
const FORGOT_PASSWORD_MSG: &str = "If account exists, password reset email will be sent";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    jwt: Arc<JwtService>,
    mailer: Arc<Mailer>,
    frontend_url: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        jwt: Arc<JwtService>,
        mailer: Arc<Mailer>,
        frontend_url: &str,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt,
            mailer,
            frontend_url: frontend_url.to_string(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserDto> {
        log::info!("Register attempt for email: {}", request.email);

        if !validate_password_strength(&request.password) {
            log::warn!("Register failed: weak password for {}", request.email);
            return Err(AppError::ValidationError(PASSWORD_ERROR_MSG.to_string()));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            log::warn!("Register failed: user already exists ({})", request.email);
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        // Accept a role from the client but only allow known values
        let role = match request.role.as_deref() {
            Some("admin") => UserRole::Admin,
            _ => UserRole::User,
        };

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            &request.name,
            &request.email,
            &password_hash,
            role,
            &request.gender,
            &request.phone_number,
            &request.dob,
            &request.state,
            &request.address,
        );

        let user = self.users.create(user).await?;
        log::info!("User registered successfully: {}", user.id);

        Ok(UserDto::from(user))
    }

    pub async fn login(&self, request: LoginRequest, client_ip: Option<String>) -> AppResult<LoginResponse> {
        // One generic message so the response never reveals whether the
        // email is registered
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                log::warn!("Login failed: user not found for {}", request.email);
                return Err(invalid());
            }
        };

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Login failed: invalid password for {}", request.email);
            return Err(invalid());
        }

        let token = self.jwt.create_token(&user)?;
        let refresh_token = self.jwt.create_refresh_token(&user.id)?;

        // Persisted so it can be revoked later
        let expires_at = Utc::now() + Duration::hours(self.jwt.refresh_expiration_hours());
        self.refresh_tokens
            .create(RefreshToken::new(&refresh_token, &user.id, expires_at, client_ip))
            .await?;

        log::info!("User logged in: {}", user.id);

        Ok(LoginResponse {
            user: UserDto::from(user),
            token,
            refresh_token,
        })
    }

    /// Rotates the pair: the presented refresh token must still be persisted
    /// (revocation check), and is replaced by a fresh one.
    pub async fn refresh_session(
        &self,
        refresh_token: &str,
        client_ip: Option<String>,
    ) -> AppResult<LoginResponse> {
        let claims = self.jwt.validate_refresh_token(refresh_token)?;

        if self.refresh_tokens.find_by_token(refresh_token).await?.is_none() {
            log::warn!("Refresh rejected: token revoked or unknown for {}", claims.sub);
            return Err(AppError::Unauthorized(
                "Refresh token has been revoked".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let token = self.jwt.create_token(&user)?;
        let new_refresh_token = self.jwt.create_refresh_token(&user.id)?;

        let expires_at = Utc::now() + Duration::hours(self.jwt.refresh_expiration_hours());
        self.refresh_tokens
            .create(RefreshToken::new(&new_refresh_token, &user.id, expires_at, client_ip))
            .await?;
        self.refresh_tokens.delete_by_token(refresh_token).await?;

        log::info!("Session refreshed for user: {}", user.id);

        Ok(LoginResponse {
            user: UserDto::from(user),
            token,
            refresh_token: new_refresh_token,
        })
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        if !validate_password_strength(&request.new_password) {
            return Err(AppError::ValidationError(PASSWORD_ERROR_MSG.to_string()));
        }

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&request.current_password, &user.password_hash)? {
            log::warn!("Change password failed: wrong current password for {}", user_id);
            return Err(AppError::Unauthorized(
                "Current password incorrect".to_string(),
            ));
        }

        user.password_hash = hash_password(&request.new_password)?;
        self.users.update(user).await?;

        log::info!("Password changed for user: {}", user_id);
        Ok(())
    }

    /// Always succeeds with the same message; the email (if any) goes out on
    /// a background task so response time does not leak account existence.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> AppResult<String> {
        let Some(mut user) = self.users.find_by_email(&request.email).await? else {
            log::info!(
                "Forgot password requested for non-existing email: {}",
                request.email
            );
            return Ok(FORGOT_PASSWORD_MSG.to_string());
        };

        let token = Uuid::new_v4().simple().to_string();
        user.reset_password_token = Some(hash_reset_token(&token));
        user.reset_password_expires = Some(Utc::now() + Duration::hours(1));
        let user = self.users.update(user).await?;

        log::info!("Password reset token generated for {}", request.email);

        let mailer = Arc::clone(&self.mailer);
        let reset_url = format!("{}/reset-password?token={}", self.frontend_url, token);
        let email = user.email.clone();
        let name = user.name.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send_password_reset(&email, &name, &reset_url).await {
                log::error!("Failed to send reset email to {}: {}", email, err);
            }
        });

        Ok(FORGOT_PASSWORD_MSG.to_string())
    }

    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<()> {
        if !validate_password_strength(&request.new_password) {
            return Err(AppError::ValidationError(PASSWORD_ERROR_MSG.to_string()));
        }

        let token_hash = hash_reset_token(&request.token);
        let user = self.users.find_by_reset_token(&token_hash).await?;

        let mut user = match user {
            Some(user)
                if user
                    .reset_password_expires
                    .is_some_and(|expires| expires > Utc::now()) =>
            {
                user
            }
            _ => {
                log::warn!("Reset password failed: invalid or expired token");
                return Err(AppError::ValidationError(
                    "Token invalid or expired".to_string(),
                ));
            }
        };

        user.password_hash = hash_password(&request.new_password)?;
        user.reset_password_token = None;
        user.reset_password_expires = None;
        let user = self.users.update(user).await?;

        log::info!("Password reset successfully for user: {}", user.id);
        Ok(())
    }
}
