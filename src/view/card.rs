use tracing::{debug, error};

use crate::tmdb::{ApiError, MovieDetail, SearchResult};

pub const DETAIL_ERROR: &str = "Failed to load movie details.";

pub const BACKDROP_ID: &str = "modal-backdrop";

// closed -> loading -> (open | closed + error), open -> closed on dismissal.
#[derive(Debug, Clone)]
pub struct ResultCard {
    movie: SearchResult,
    detail: Option<MovieDetail>,
    detail_loading: bool,
    detail_error: Option<String>,
    overlay_visible: bool,
    poster_load_failed: bool,
}

impl ResultCard {
    pub fn new(movie: SearchResult) -> Self {
        Self {
            movie,
            detail: None,
            detail_loading: false,
            detail_error: None,
            overlay_visible: false,
            poster_load_failed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.movie.id
    }

    pub fn movie(&self) -> &SearchResult {
        &self.movie
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn detail_loading(&self) -> bool {
        self.detail_loading
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn poster_load_failed(&self) -> bool {
        self.poster_load_failed
    }

    pub fn poster_failed(&mut self) {
        if !self.poster_load_failed {
            debug!(id = self.movie.id, "poster failed to load, using placeholder");
        }
        self.poster_load_failed = true;
    }

    /// Returns the id to fetch, or closes an open overlay and returns `None`.
    pub fn toggle_details(&mut self) -> Option<u64> {
        if self.overlay_visible {
            self.close();
            return None;
        }
        self.detail_loading = true;
        self.detail_error = None;
        Some(self.movie.id)
    }

    pub fn finish_details(&mut self, outcome: Result<MovieDetail, ApiError>) {
        match outcome {
            Ok(detail) => {
                self.detail = Some(detail);
                self.overlay_visible = true;
            }
            Err(e) => {
                error!(id = self.movie.id, "Error fetching movie details: {}", e);
                self.detail = None;
                self.detail_error = Some(DETAIL_ERROR.to_string());
                self.overlay_visible = false;
            }
        }
        self.detail_loading = false;
    }

    // The payload is dropped, the next open fetches again.
    pub fn close(&mut self) {
        self.overlay_visible = false;
        self.detail = None;
    }

    pub fn overlay_clicked(&mut self, target: &str) {
        if target == BACKDROP_ID {
            self.close();
        }
    }
}
