use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info};

use crate::model::{Article, ArticlesResponse, CategoriesResponse, Category};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the upstream news API.
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent("NuggetNews/1.0 (News Frontend)")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let body: CategoriesResponse = self.get_json("/categories/", &[]).await?;
        info!("Fetched {} categories", body.categories.len());
        Ok(body.categories)
    }

    pub async fn fetch_articles(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Article>, FetchError> {
        let limit = limit.to_string();
        let body: ArticlesResponse = self
            .get_json(
                "/fetch-articles/",
                &[("category", category), ("limit", limit.as_str())],
            )
            .await?;
        info!(
            "Fetched {} articles for category '{}'",
            body.articles.len(),
            category
        );
        Ok(body.articles)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {} returned {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}
