use std::future::Future;

use axum::http::HeaderName;
use thiserror::Error;

use crate::{
    catalog::{filter::FilterDimension, query::QueryRequest},
    models::Product,
    response::ApiResponse,
};

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// One page of the filtered catalog. `total_items` counts the whole filtered set.
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub total_items: u64,
}

#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog responded with status {0}")]
    Status(u16),

    #[error("catalog response carried no data")]
    MissingData,
}

/// Transport used by the catalog orchestrator.
pub trait CatalogService {
    fn fetch_page(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<CatalogPage, CatalogClientError>>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Needed for admin-scoped requests.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub async fn dimensions(&self) -> Result<Vec<FilterDimension>, CatalogClientError> {
        let url = format!("{}/api/products/dimensions", self.base_url);
        let response = self.authorized(self.http.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogClientError::Status(status.as_u16()));
        }
        let body: ApiResponse<Vec<FilterDimension>> = response.json().await?;
        body.data.ok_or(CatalogClientError::MissingData)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl CatalogService for HttpCatalogClient {
    async fn fetch_page(&self, request: &QueryRequest) -> Result<CatalogPage, CatalogClientError> {
        let url = format!("{}/api/products?{}", self.base_url, request.to_query_string());
        let response = self.authorized(self.http.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogClientError::Status(status.as_u16()));
        }

        let header_total = response
            .headers()
            .get(TOTAL_COUNT_HEADER.as_str())
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let body: ApiResponse<Vec<Product>> = response.json().await?;
        let meta_total = body.meta.as_ref().and_then(|meta| meta.total);
        let items = body.data.ok_or(CatalogClientError::MissingData)?;
        let total_items = header_total
            .or(meta_total)
            .unwrap_or(items.len() as u64);

        Ok(CatalogPage { items, total_items })
    }
}
