//! Timer API client
//!
//! Thin typed wrapper over the HTTP surface. Bearer tokens obtained from
//! register/login are held by the client and attached to every later call.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use unveil_types::{
    DeleteAccountResponse, ErrorBody, LoginRequest, ProfileResponse, RegisterRequest,
    StartSessionRequest, StartSessionResponse, TokenResponse, UpdateProfileRequest, UsageSnapshot,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Outcome of a session-start request.
///
/// A gate denial is an expected answer, not an error: callers present the
/// reason and keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The gate allowed the start and the ledger recorded it.
    Authorized { usage: Option<UsageSnapshot> },
    /// The gate denied the start.
    Denied { reason: String },
}

/// HTTP client for the timer API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self {
            http,
            config,
            token: None,
        })
    }

    /// Attach a previously obtained bearer token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register an account. The returned token is retained for later calls.
    #[instrument(skip(self, request))]
    pub async fn register(
        &mut self,
        request: &RegisterRequest,
    ) -> Result<TokenResponse, ClientError> {
        debug!(email = %request.email, "registering account");
        let response = self
            .request(Method::POST, "/api/v1/accounts/register")
            .json(request)
            .send()
            .await?;
        let token: TokenResponse = Self::handle(response).await?;
        self.token = Some(token.token.clone());
        Ok(token)
    }

    /// Log in. The returned token is retained for later calls.
    #[instrument(skip(self, request))]
    pub async fn login(&mut self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        debug!(email = %request.email, "logging in");
        let response = self
            .request(Method::POST, "/api/v1/accounts/login")
            .json(request)
            .send()
            .await?;
        let token: TokenResponse = Self::handle(response).await?;
        self.token = Some(token.token.clone());
        Ok(token)
    }

    /// Fetch the authenticated account's profile and usage.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<ProfileResponse, ClientError> {
        let response = self
            .request(Method::GET, "/api/v1/accounts/profile")
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Apply a partial profile update.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<ProfileResponse, ClientError> {
        let response = self
            .request(Method::PUT, "/api/v1/accounts/profile")
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Delete the authenticated account. Clears the held token on success.
    #[instrument(skip(self))]
    pub async fn delete_account(&mut self) -> Result<DeleteAccountResponse, ClientError> {
        let response = self
            .request(Method::DELETE, "/api/v1/accounts")
            .send()
            .await?;
        let deleted: DeleteAccountResponse = Self::handle(response).await?;
        self.token = None;
        Ok(deleted)
    }

    // =========================================================================
    // Sessions & Usage
    // =========================================================================

    /// Ask the server to authorize and record a timer session start.
    ///
    /// Both the 200 approval and the 403 denial carry the same body shape;
    /// anything else is an error.
    #[instrument(skip(self))]
    pub async fn start_session(&self, duration_seconds: i64) -> Result<StartOutcome, ClientError> {
        debug!(duration_seconds, "requesting session start");
        let response = self
            .request(Method::POST, "/api/v1/sessions/start")
            .json(&StartSessionRequest { duration_seconds })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::FORBIDDEN {
            let body: StartSessionResponse = response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            if body.authorized {
                return Ok(StartOutcome::Authorized { usage: body.usage });
            }
            return Ok(StartOutcome::Denied {
                reason: body
                    .reason
                    .unwrap_or_else(|| "session start denied".to_string()),
            });
        }
        Err(Self::error_from_response(status, response).await)
    }

    /// Fetch the authenticated account's usage snapshot.
    #[instrument(skip(self))]
    pub async fn usage_status(&self) -> Result<UsageSnapshot, ClientError> {
        let response = self
            .request(Method::GET, "/api/v1/usage/status")
            .send()
            .await?;
        let usage: UsageSnapshot = Self::handle(response).await?;
        if usage.timers_started < 0 {
            return Err(ClientError::InvalidResponse(format!(
                "negative timers_started: {}",
                usage.timers_started
            )));
        }
        Ok(usage)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }
        Err(Self::error_from_response(status, response).await)
    }

    async fn error_from_response(status: StatusCode, response: Response) -> ClientError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        match status {
            StatusCode::BAD_REQUEST => ClientError::InvalidArgument(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthenticated(message),
            StatusCode::FORBIDDEN => ClientError::PermissionDenied(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::AlreadyExists(message),
            StatusCode::SERVICE_UNAVAILABLE => ClientError::Unavailable(message),
            _ => ClientError::Server(message),
        }
    }
}
