pub mod client;
pub mod image;
pub mod types;

pub use client::TmdbClient;
pub use image::{ImageHost, PosterSize};
pub use types::{Genre, MovieDetail, SearchResponse, SearchResult};

use async_trait::async_trait;

#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;
    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bearer token is not a valid header value")]
    InvalidCredential,
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("request to {0} failed: {1}")]
    Transport(String, reqwest::Error),
    #[error("{0} returned {1}")]
    Status(String, reqwest::StatusCode),
    #[error("failed to decode response from {0}: {1}")]
    Decode(String, serde_json::Error),
}
