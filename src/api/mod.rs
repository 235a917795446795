//! Backend REST client
//!
//! Thin typed client for the journaling backend: auth, journal CRUD, AI
//! affirmations and activity suggestions, and the therapist review
//! endpoints. All real logic (authentication, AI analysis, persistence)
//! lives server-side; this client renders state and issues requests.
//!
//! Server-side failures arrive as an HTTP status plus a `detail` string in
//! the body; both are surfaced through [`ApiError::Server`].

mod models;

pub use models::{
    ActivitySuggestion, Affirmation, AuthResponse, ClientSummary, Feedback, FeedbackCreate,
    JournalEntry, JournalEntryCreate, MoodAnalysis, MoodLevel, TherapistDashboard, User, UserRole,
};

use crate::config::Config;
use crate::error::ApiError;
use models::{AffirmationRequest, LoginRequest, SignUpRequest};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;
use zeroize::Zeroizing;

/// Client for the journaling backend API.
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
    token: Option<Zeroizing<String>>,
}

/// Error body shape used by the backend for all failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiClient {
    /// Create a client against an explicit base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidResponse(format!("invalid API base URL: {}", e)))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            client,
            token: None,
        })
    }

    /// Create a client from the loaded application configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Attach a bearer token to subsequent requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(Zeroizing::new(token.to_string()));
    }

    /// Drop the bearer token. Token bytes are zeroized.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether the client currently carries a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidResponse(format!("invalid endpoint {}: {}", path, e)))
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token
            .as_deref()
            .map(String::as_str)
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Map a non-success response to an error, reading the `detail` field.
    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| "request failed".to_string());
        ApiError::Server { status, detail }
    }

    async fn read<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    // --- Auth ---

    /// Sign in. On success the returned token is attached to this client.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let auth: AuthResponse = Self::read(response).await?;
        self.set_token(&auth.access_token);
        info!("Signed in as {:?}", auth.user.role);
        Ok(auth)
    }

    /// Create an account. On success the returned token is attached.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> Result<AuthResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/signup")?)
            .json(&SignUpRequest {
                email,
                password,
                full_name,
                role,
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::read(response).await?;
        self.set_token(&auth.access_token);
        info!("Account created for {:?}", auth.user.role);
        Ok(auth)
    }

    // --- Journal ---

    /// Submit a journal entry.
    pub async fn create_entry(
        &self,
        entry: &JournalEntryCreate,
    ) -> Result<JournalEntry, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/journal")?)
            .bearer_auth(self.bearer()?)
            .json(entry)
            .send()
            .await?;
        Self::read(response).await
    }

    /// Fetch the signed-in user's entries, newest first.
    pub async fn my_entries(&self, limit: Option<u32>) -> Result<Vec<JournalEntry>, ApiError> {
        let mut request = self
            .client
            .get(self.endpoint("/api/journal/me")?)
            .bearer_auth(self.bearer()?);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        Self::read(request.send().await?).await
    }

    /// Delete one of the signed-in user's entries.
    pub async fn delete_entry(&self, entry_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/journal/{}", entry_id))?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    // --- AI ---

    /// Fetch the daily affirmation for the client dashboard.
    pub async fn daily_affirmation(&self, user_id: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/ai/affirmation")?)
            .bearer_auth(self.bearer()?)
            .json(&AffirmationRequest {
                user_id,
                context: None,
            })
            .send()
            .await?;
        let body: Affirmation = Self::read(response).await?;
        Ok(body.affirmation)
    }

    /// Fetch suggested wellbeing activities.
    pub async fn activity_suggestions(&self) -> Result<Vec<ActivitySuggestion>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/ai/activities")?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::read(response).await
    }

    // --- Therapist ---

    /// Fetch aggregate numbers for the therapist dashboard.
    pub async fn therapist_dashboard(&self) -> Result<TherapistDashboard, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/therapist/dashboard")?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::read(response).await
    }

    /// Fetch the therapist's client list.
    pub async fn therapist_clients(&self) -> Result<Vec<ClientSummary>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/therapist/clients")?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::read(response).await
    }

    /// Fetch one client's journal entries for review.
    pub async fn client_journals(&self, client_id: &str) -> Result<Vec<JournalEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/therapist/clients/{}/journals", client_id))?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::read(response).await
    }

    /// Send feedback or encouragement to a client.
    pub async fn send_feedback(&self, feedback: &FeedbackCreate) -> Result<Feedback, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/feedback")?)
            .bearer_auth(self.bearer()?)
            .json(feedback)
            .send()
            .await?;
        Self::read(response).await
    }
}
