//! Authentication service
//!
//! Handles user registration, login and token refresh.

use social_common::{validate_password_strength, AppError, TokenPair};
use social_core::{DomainError, Snowflake, User};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password)?;

        if self
            .ctx
            .user_repo()
            .exists_by_email_or_username(&request.email, &request.username)
            .await?
        {
            return Err(ServiceError::conflict("User already exists"));
        }

        let password_hash = self.ctx.password_service().hash(&request.password).await?;

        let user = User::new(
            self.ctx.generate_id(),
            request.email.trim().to_string(),
            request.username,
            request.full_name.trim().to_string(),
        );

        // A concurrent registration can still win the unique index
        self.ctx
            .user_repo()
            .create(&user, &password_hash)
            .await
            .map_err(|e| match e {
                DomainError::UserAlreadyExists => ServiceError::conflict("User already exists"),
                other => ServiceError::from(other),
            })?;

        info!(user_id = %user.id, "User registered successfully");

        let tokens = self.issue_tokens(user.id)?;
        Ok(AuthResponse::new(tokens, CurrentUserResponse::from(&user)))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .await
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        let tokens = self.issue_tokens(user.id)?;
        Ok(AuthResponse::new(tokens, CurrentUserResponse::from(&user)))
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<TokenPair> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // Tokens outlive nothing: the account must still be there
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            warn!(user_id = %user_id, "Refresh rejected: user no longer exists");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let tokens = self.issue_tokens(user_id)?;
        info!(user_id = %user_id, "Tokens refreshed successfully");

        Ok(tokens)
    }

    fn issue_tokens(&self, user_id: Snowflake) -> ServiceResult<TokenPair> {
        self.ctx
            .jwt_service()
            .generate_token_pair(user_id)
            .map_err(|e| ServiceError::internal(e.to_string()))
    }
}
