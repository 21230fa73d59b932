//! Auth service - ties together password checks, token issuance, and account CRUD

use std::sync::Arc;
use unveil_store::{CreateUser, ProfileUpdate, UserRecord, UserStore};
use unveil_types::{is_valid_email, UserId};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    password::{hash_password, verify_password},
    token::TokenSigner,
    AuthError,
};

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Account service over a [`UserStore`].
///
/// Owns the token signer, so every issued token and every verified token
/// goes through one place.
pub struct AuthService<S: UserStore> {
    signer: TokenSigner,
    store: Arc<S>,
}

impl<S: UserStore> AuthService<S> {
    /// Create a new auth service.
    ///
    /// Fails when the configured token secret is too short.
    pub fn new(config: &AuthConfig, store: Arc<S>) -> Result<Self, AuthError> {
        let signer = TokenSigner::new(&config.token_secret, config.token_ttl)?;
        Ok(Self { signer, store })
    }

    // =========================================================================
    // Registration & Login
    // =========================================================================

    /// Register a new account and issue its first token.
    pub async fn register(&self, account: NewAccount) -> Result<(UserRecord, String), AuthError> {
        if !is_valid_email(&account.email) {
            return Err(AuthError::InvalidEmail);
        }

        let password_hash = hash_password(&account.password)?;
        let user = self
            .store
            .create(CreateUser {
                id: Uuid::new_v4(),
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email,
                password_hash,
            })
            .await?;

        let token = self.signer.issue(user.user_id())?;
        tracing::info!(user_id = %user.user_id(), "account registered");
        Ok((user, token))
    }

    /// Log in with email and password.
    ///
    /// Unknown email and wrong password both return
    /// [`AuthError::InvalidCredentials`], so callers cannot probe which
    /// addresses are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<(UserRecord, String), AuthError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(user.user_id())?;
        tracing::info!(user_id = %user.user_id(), "login succeeded");
        Ok((user, token))
    }

    // =========================================================================
    // Token Verification
    // =========================================================================

    /// Verify a bearer token and return the authenticated user id.
    ///
    /// Pure signature and expiry check; whether the account still exists is
    /// the caller's concern, so deleted accounts surface as 404 on the
    /// operation rather than 401 here.
    pub fn authenticate(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.signer.verify(token)?;
        claims.user_id().ok_or(AuthError::InvalidToken)
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Fetch the account record for `user_id`.
    pub async fn profile(&self, user_id: UserId) -> Result<UserRecord, AuthError> {
        self.store
            .find_by_id(user_id.as_uuid())
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply a partial profile update.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthError> {
        if let Some(email) = update.email.as_deref() {
            if !is_valid_email(email) {
                return Err(AuthError::InvalidEmail);
            }
        }
        let user = self.store.update_profile(user_id.as_uuid(), update).await?;
        Ok(user)
    }

    /// Delete the account.
    pub async fn delete_account(&self, user_id: UserId) -> Result<(), AuthError> {
        self.store.delete(user_id.as_uuid()).await?;
        tracing::info!(user_id = %user_id, "account deleted");
        Ok(())
    }
}

impl<S: UserStore> std::fmt::Debug for AuthService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
