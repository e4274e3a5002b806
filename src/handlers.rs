use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, error};

use crate::server::AppState;
use crate::session::SharedView;
use crate::view::render::placeholder_svg;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ClickForm {
    #[serde(default)]
    pub target: String,
}

fn spawn_search(state: &AppState, view: SharedView, query: String) {
    let api = state.api.clone();
    tokio::spawn(async move {
        let outcome = api.search_movies(&query).await;
        view.lock().await.finish_search(outcome);
    });
}

fn spawn_details(state: &AppState, view: SharedView, generation: u64, id: u64) {
    let api = state.api.clone();
    tokio::spawn(async move {
        let outcome = api.movie_detail(id).await;
        match view.lock().await.card_mut(generation, id) {
            Some(card) => card.finish_details(outcome),
            None => debug!(id, generation, "card was unmounted, dropping detail response"),
        }
    });
}

pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), StatusCode> {
    let (jar, view) = state.sessions.resolve(jar).await;

    let mut guard = view.lock().await;
    if let Some(query) = guard.mount() {
        spawn_search(&state, view.clone(), query);
    }

    let html = state.renderer.render_page(&guard).map_err(|e| {
        error!("Failed to render page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((jar, Html(html)))
}

pub async fn submit_search(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> (CookieJar, Redirect) {
    let (jar, view) = state.sessions.resolve(jar).await;

    let query = view.lock().await.submit(&form.query);
    spawn_search(&state, view, query);

    (jar, Redirect::to("/"))
}

pub async fn card_details(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((generation, id)): Path<(u64, u64)>,
) -> Redirect {
    let Some(view) = state.sessions.existing(&jar).await else {
        return Redirect::to("/");
    };

    let fetch = view
        .lock()
        .await
        .card_mut(generation, id)
        .and_then(|card| card.toggle_details());

    if let Some(movie_id) = fetch {
        spawn_details(&state, view, generation, movie_id);
    }

    Redirect::to("/")
}

pub async fn card_close(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((generation, id)): Path<(u64, u64)>,
) -> Redirect {
    if let Some(view) = state.sessions.existing(&jar).await {
        if let Some(card) = view.lock().await.card_mut(generation, id) {
            card.close();
        }
    }

    Redirect::to("/")
}

pub async fn card_click(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((generation, id)): Path<(u64, u64)>,
    Form(form): Form<ClickForm>,
) -> Redirect {
    if let Some(view) = state.sessions.existing(&jar).await {
        if let Some(card) = view.lock().await.card_mut(generation, id) {
            card.overlay_clicked(&form.target);
        }
    }

    Redirect::to("/")
}

pub async fn poster_error(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((generation, id)): Path<(u64, u64)>,
) -> StatusCode {
    let Some(view) = state.sessions.existing(&jar).await else {
        return StatusCode::NOT_FOUND;
    };

    let mut guard = view.lock().await;
    match guard.card_mut(generation, id) {
        Some(card) => {
            card.poster_failed();
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

pub async fn placeholder_image(Path((width, height)): Path<(u32, u32)>) -> Response {
    if width == 0 || height == 0 || width > 2000 || height > 2000 {
        return StatusCode::BAD_REQUEST.into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "max-age=86400"),
        ],
        placeholder_svg(width, height),
    )
        .into_response()
}
