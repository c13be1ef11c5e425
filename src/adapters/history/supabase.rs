//! Supabase History Repository - PostgREST access to `analysis_history`.
//!
//! Requests authenticate with the service key in both the `apikey` and
//! `Authorization` headers. Row-level security on the table decides what
//! the key may touch.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::history::HistoryEntry;
use crate::ports::HistoryRepository;

/// Configuration for the Supabase repository.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., https://xyz.supabase.co).
    pub url: String,
    service_key: Secret<String>,
    pub table: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_key: Secret::new(service_key.into()),
            table: "analysis_history".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn service_key(&self) -> &str {
        self.service_key.expose_secret()
    }
}

/// PostgREST implementation of `HistoryRepository`.
pub struct SupabaseHistoryRepository {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseHistoryRepository {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .timeout(self.config.timeout)
            .header("apikey", self.config.service_key())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.service_key()),
            )
    }

    async fn check_status(response: Response, action: &str) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}", action))
                .with_detail("status", status.as_u16().to_string())
                .with_detail("body", body),
        )
    }
}

fn request_error(action: &str, err: reqwest::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, err),
    )
}

#[async_trait]
impl HistoryRepository for SupabaseHistoryRepository {
    async fn record(&self, entry: &HistoryEntry) -> Result<(), DomainError> {
        let action = "insert analysis history";
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(|e| request_error(action, e))?;

        Self::check_status(response, action).await?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, DomainError> {
        let action = "query analysis history";
        let user_filter = format!("eq.{}", user_id.as_str());
        let limit = limit.to_string();

        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| request_error(action, e))?;

        let response = Self::check_status(response, action).await?;
        response.json::<Vec<HistoryEntry>>().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to parse analysis history: {}", e),
            )
        })
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
