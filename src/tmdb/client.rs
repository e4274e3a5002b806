use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{MovieDetail, SearchResponse, SearchResult};
use super::{ApiError, MovieApi};
use crate::config::TmdbConfig;

pub struct TmdbClient {
    http: reqwest::Client,
    api_base: String,
}

impl TmdbClient {
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidCredential)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TmdbConfig, token: &str) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base,
            token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_base, path);
        debug!(url = %url, "TMDB request");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(url.clone(), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(url, status));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(url.clone(), e))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(url, e))
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let resp: SearchResponse = self.get("/search/movie", &[("query", query)]).await?;
        Ok(resp.results)
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, ApiError> {
        self.get(&format!("/movie/{}", id), &[]).await
    }
}
