use tracing::{error, info};

use super::card::ResultCard;
use crate::tmdb::{ApiError, SearchResult};

pub const SEARCH_ERROR: &str = "Failed to fetch movies. Please try again.";
pub const NO_RESULTS: &str = "No movies found. Try a different search.";

// Each settled search mounts a new grid generation. Cards of older grids stop resolving.
#[derive(Debug)]
pub struct SearchView {
    query: String,
    results: Vec<SearchResult>,
    cards: Vec<ResultCard>,
    generation: u64,
    loading: bool,
    error: Option<String>,
    mounted: bool,
}

impl SearchView {
    pub fn new(default_query: &str) -> Self {
        Self {
            query: default_query.to_string(),
            results: Vec::new(),
            cards: Vec::new(),
            generation: 0,
            loading: false,
            error: None,
            mounted: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cards(&self) -> &[ResultCard] {
        &self.cards
    }

    pub fn card_mut(&mut self, generation: u64, id: u64) -> Option<&mut ResultCard> {
        if generation != self.generation {
            return None;
        }
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    /// Returns the query to search for, exactly once per view.
    pub fn mount(&mut self) -> Option<String> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin_search())
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn submit(&mut self, query: &str) -> String {
        self.set_query(query);
        self.mounted = true;
        self.begin_search()
    }

    pub fn begin_search(&mut self) -> String {
        self.loading = true;
        self.error = None;
        self.cards.clear();
        self.query.clone()
    }

    // On failure the previous results are kept.
    pub fn finish_search(&mut self, outcome: Result<Vec<SearchResult>, ApiError>) {
        match outcome {
            Ok(results) => {
                info!(count = results.len(), "search returned results");
                self.results = results;
            }
            Err(e) => {
                error!("Error fetching movies: {}", e);
                self.error = Some(SEARCH_ERROR.to_string());
            }
        }
        self.loading = false;
        self.generation += 1;
        self.cards = self.results.iter().cloned().map(ResultCard::new).collect();
    }
}
