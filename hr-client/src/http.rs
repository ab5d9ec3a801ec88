//! HTTP client for network-based API calls

use crate::{Ack, ClientConfig, ClientError, ClientResult, LoginResponse, RemoteEmployee, RemoteEmployeeCreate};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::LoginRequest;

/// HTTP client for making requests to the HR backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.post(self.url(path))).await
    }

    /// Attach the bearer token, send and decode
    async fn send<T: DeserializeOwned>(&self, mut request: RequestBuilder) -> ClientResult<T> {
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = %status, body = %text, "API request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(text))
                }
                _ => Err(ClientError::Internal(text)),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    // ========== Health API ==========

    /// Liveness check
    pub async fn check_health(&self) -> ClientResult<serde_json::Value> {
        self.get("/health").await
    }

    /// Readiness check (database reachable)
    pub async fn check_ready(&self) -> ClientResult<serde_json::Value> {
        self.get("/health/ready").await
    }

    // ========== Auth API ==========

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post("/api/v1/auth/login", &request).await
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<Ack> {
        let ack = self.post_empty::<Ack>("/api/v1/auth/logout").await?;
        self.token = None;
        Ok(ack)
    }

    // ========== Employee API ==========

    /// Fetch one page of the employee directory
    pub async fn get_employees(&self, skip: u32, limit: u32) -> ClientResult<Vec<RemoteEmployee>> {
        self.get(&format!("/api/v1/employees?skip={}&limit={}", skip, limit))
            .await
    }

    /// Fetch a single employee by remote id
    pub async fn get_employee(&self, id: i64) -> ClientResult<RemoteEmployee> {
        self.get(&format!("/api/v1/employees/{}", id)).await
    }

    /// Create an employee on the backend
    pub async fn create_employee(&self, data: &RemoteEmployeeCreate) -> ClientResult<RemoteEmployee> {
        self.post("/api/v1/employees", data).await
    }
}
