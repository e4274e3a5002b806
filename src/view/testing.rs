use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ResultCard, SearchView};
use crate::tmdb::{ApiError, Genre, MovieApi, MovieDetail, SearchResult};

pub fn movie(id: u64, title: &str) -> SearchResult {
    SearchResult {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        overview: Some(format!("Overview of {}.", title)),
        release_date: Some("2008-07-16".to_string()),
        vote_average: 7.8,
    }
}

pub fn detail(id: u64, title: &str) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        tagline: Some("Your mind is the scene of the crime.".to_string()),
        runtime_minutes: Some(148),
        genres: vec![
            Genre { name: "Action".to_string() },
            Genre { name: "Science Fiction".to_string() },
        ],
        release_date: Some("2010-07-15".to_string()),
        vote_average: 8.369,
        vote_count: 34495,
        overview: "First line.\nSecond line.".to_string(),
        poster_path: Some(format!("/detail-{}.jpg", id)),
    }
}

pub async fn search(view: &mut SearchView, api: &dyn MovieApi) {
    let query = view.begin_search();
    let outcome = api.search_movies(&query).await;
    view.finish_search(outcome);
}

pub async fn view_details(card: &mut ResultCard, api: &dyn MovieApi) {
    if let Some(id) = card.toggle_details() {
        let outcome = api.movie_detail(id).await;
        card.finish_details(outcome);
    }
}

fn failure() -> ApiError {
    ApiError::Status(
        "http://tmdb.test".to_string(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
    )
}

#[derive(Default)]
pub struct FakeApi {
    results: Mutex<Vec<SearchResult>>,
    details: Mutex<HashMap<u64, MovieDetail>>,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<u64>>,
    fail_search: Mutex<bool>,
    fail_details: Mutex<bool>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, results: Vec<SearchResult>) -> Self {
        self.set_results(results);
        self
    }

    pub fn with_detail(self, detail: MovieDetail) -> Self {
        self.details.lock().unwrap().insert(detail.id, detail);
        self
    }

    pub fn set_results(&self, results: Vec<SearchResult>) {
        *self.results.lock().unwrap() = results;
    }

    pub fn fail_search(&self, fail: bool) {
        *self.fail_search.lock().unwrap() = fail;
    }

    pub fn fail_details(&self, fail: bool) {
        *self.fail_details.lock().unwrap() = fail;
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn search_movies(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if *self.fail_search.lock().unwrap() {
            return Err(failure());
        }
        Ok(self.results.lock().unwrap().clone())
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, ApiError> {
        self.detail_calls.lock().unwrap().push(id);
        if *self.fail_details.lock().unwrap() {
            return Err(failure());
        }
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(failure)
    }
}
