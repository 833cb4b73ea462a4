//! HTTP client for the Upoint backend
//!
//! All calls go through [`ApiClient::send`], which attaches the bearer token
//! and turns non-success statuses into [`ApiFailure::Response`].

use super::failure::ApiFailure;
use super::traits::UpointApi;
use super::types::{AddressPayload, CompanyPayload, CompanySummary, CountResponse, EmployeePayload};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "https://upoint-deploy-jpa-production.up.railway.app";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "UPOINT_API_URL";

const COMPANIES: &str = "/empresas";
const EMPLOYEES: &str = "/auth/funcionarios";
const ADDRESSES: &str = "/enderecos";
const EMPLOYEE_COUNT: &str = "/auth/funcionarios/count";
const RECORD_COUNT: &str = "/registros/count";

/// Client for the Upoint REST API
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for `base_url`, unless the environment overrides it
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| base_url.to_string());
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        let builder = match token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        builder
    }

    /// Send a request and decode the body of a successful response
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiFailure> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "request rejected");
            return Err(ApiFailure::response(status.as_u16(), &body));
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| ApiFailure::Local(format!("invalid response: {e}")))
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, payload: &B) -> Result<Value, ApiFailure> {
        tracing::debug!(path, "POST");
        self.send(self.request(Method::POST, path).json(payload)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        tracing::debug!(path, "GET");
        self.send(self.request(Method::GET, path)).await
    }
}

#[async_trait]
impl UpointApi for ApiClient {
    async fn create_company(&self, payload: &CompanyPayload) -> Result<Value, ApiFailure> {
        self.post(COMPANIES, payload).await
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> Result<Value, ApiFailure> {
        self.post(EMPLOYEES, payload).await
    }

    async fn create_address(&self, payload: &AddressPayload) -> Result<Value, ApiFailure> {
        self.post(ADDRESSES, payload).await
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, ApiFailure> {
        self.get(COMPANIES).await
    }

    async fn employee_count(&self) -> Result<u64, ApiFailure> {
        self.get::<CountResponse>(EMPLOYEE_COUNT).await.map(|c| c.total)
    }

    async fn record_count(&self) -> Result<u64, ApiFailure> {
        self.get::<CountResponse>(RECORD_COUNT).await.map(|c| c.total)
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
