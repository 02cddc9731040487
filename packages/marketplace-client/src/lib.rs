//! Pure REST API client for the travel marketplace backend.
//!
//! One method per user-facing listing endpoint. Filters arrive as typed
//! param structs whose unset fields are omitted from the query string.
//! Non-success statuses become [`ApiError::Api`] with the status preserved
//! for classification (401 → auth).
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_client::{MarketplaceClient, EventParams, EventSortField};
//! use listing_core::SortOrder;
//!
//! let client = MarketplaceClient::from_env().with_token(session_token);
//! let events = client
//!     .events(&EventParams {
//!         location: Some("Tromso".into()),
//!         date: None,
//!         sort_by: EventSortField::EventDate,
//!         sort_order: SortOrder::Asc,
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{
    Booking, Event, EventParams, EventSortField, Guide, GuideParams, GuideSortField, GuideStatus,
    HolidayPackage, HolidayParams, HolidaySortField,
};

use serde::de::DeserializeOwned;
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "MARKETPLACE_API_URL";

#[derive(Clone)]
pub struct MarketplaceClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl MarketplaceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Build a client from `MARKETPLACE_API_URL`, falling back to the local
    /// development backend.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Attach a bearer token for authenticated endpoints (bookings).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The caller's own bookings. Parameterless; requires authentication.
    pub async fn bookings(&self) -> Result<Vec<Booking>> {
        self.get("/user/bookings").await
    }

    pub async fn events(&self, params: &EventParams) -> Result<Vec<Event>> {
        self.get_with("/user/events", params).await
    }

    pub async fn guides(&self, params: &GuideParams) -> Result<Vec<Guide>> {
        self.get_with("/user/guides", params).await
    }

    pub async fn holidays(&self, params: &HolidayParams) -> Result<Vec<HolidayPackage>> {
        self.get_with("/user/holidays", params).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        let req = self.client.get(&url);
        self.execute(url, req).await
    }

    async fn get_with<P, T>(&self, path: &str, params: &P) -> Result<Vec<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let req = self.client.get(&url).query(params);
        self.execute(url, req).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: String,
        mut req: reqwest::RequestBuilder,
    ) -> Result<Vec<T>> {
        tracing::debug!(%url, "listing request");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "listing request rejected");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let records: Vec<T> = resp.json().await?;
        tracing::debug!(%url, count = records.len(), "listing response");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_endpoint_path() {
        let client = MarketplaceClient::new("http://backend:8080/api");
        assert_eq!(
            client.url("/user/bookings"),
            "http://backend:8080/api/user/bookings"
        );
        assert_eq!(
            client.url("/user/holidays"),
            "http://backend:8080/api/user/holidays"
        );
    }
}
