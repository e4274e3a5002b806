use serde::{Deserialize, Deserializer, Serialize};

/// Envelope of `GET /search/movie`. A missing `results` field is an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default, rename = "runtime")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

// TMDB sends explicit nulls for fields it otherwise always includes.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
