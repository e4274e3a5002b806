use minijinja::{context, Environment};
use serde::Serialize;

use super::card::{ResultCard, BACKDROP_ID};
use super::format::{
    card_rating, format_date, format_genres, format_runtime, format_tagline, format_vote,
};
use super::search::{SearchView, NO_RESULTS};
use crate::tmdb::{ImageHost, MovieDetail, PosterSize};

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");
const CARD_TEMPLATE: &str = include_str!("../../templates/card.html");
const OVERLAY_TEMPLATE: &str = include_str!("../../templates/overlay.html");

// Template names end in `.html` so minijinja auto-escapes every value.
pub struct Renderer {
    env: Environment<'static>,
    images: ImageHost,
}

#[derive(Debug, Serialize)]
pub struct PageModel {
    pub query: String,
    pub loading: bool,
    pub refresh: bool,
    pub error: Option<String>,
    pub no_results: Option<&'static str>,
    pub cards: Vec<CardModel>,
}

#[derive(Debug, Serialize)]
pub struct CardModel {
    pub id: u64,
    pub action: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub rating: Option<String>,
    pub release: String,
    pub overview: Option<String>,
    pub detail_loading: bool,
    pub detail_error: Option<String>,
    pub overlay: Option<OverlayModel>,
}

#[derive(Debug, Serialize)]
pub struct OverlayModel {
    pub backdrop_id: &'static str,
    pub title: String,
    pub poster_url: String,
    pub poster_fallback: &'static str,
    pub tagline: String,
    pub runtime: String,
    pub genres: String,
    pub release: String,
    pub rating: String,
    pub vote_count: u64,
    pub overview: String,
}

impl Renderer {
    pub fn new(images: ImageHost) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)?;
        env.add_template("card.html", CARD_TEMPLATE)?;
        env.add_template("overlay.html", OVERLAY_TEMPLATE)?;
        Ok(Self { env, images })
    }

    pub fn page_model(&self, view: &SearchView) -> PageModel {
        let cards: Vec<CardModel> = if view.loading() {
            Vec::new()
        } else {
            view.cards()
                .iter()
                .map(|c| self.card_model(view.generation(), c))
                .collect()
        };
        let no_results = (!view.loading() && cards.is_empty()).then_some(NO_RESULTS);
        let refresh = view.loading() || cards.iter().any(|c| c.detail_loading);

        PageModel {
            query: view.query().to_string(),
            loading: view.loading(),
            refresh,
            error: view.error().map(str::to_string),
            no_results,
            cards,
        }
    }

    fn card_model(&self, generation: u64, card: &ResultCard) -> CardModel {
        let movie = card.movie();
        let poster_url = (!card.poster_load_failed())
            .then(|| self.images.poster_url(movie.poster_path.as_deref(), PosterSize::Card));
        let overview = movie
            .overview
            .clone()
            .filter(|o| !o.is_empty() && !card.overlay_visible());
        let overlay = card
            .detail()
            .filter(|_| card.overlay_visible())
            .map(|d| self.overlay_model(d));

        CardModel {
            id: movie.id,
            action: format!("/card/{}/{}", generation, movie.id),
            title: movie.title.clone(),
            poster_url,
            rating: card_rating(movie.vote_average),
            release: format_date(movie.release_date.as_deref()),
            overview,
            detail_loading: card.detail_loading(),
            detail_error: card.detail_error().map(str::to_string),
            overlay,
        }
    }

    fn overlay_model(&self, detail: &MovieDetail) -> OverlayModel {
        OverlayModel {
            backdrop_id: BACKDROP_ID,
            title: detail.title.clone(),
            poster_url: self
                .images
                .poster_url(detail.poster_path.as_deref(), PosterSize::Overlay),
            poster_fallback: PosterSize::Overlay.placeholder(),
            tagline: format_tagline(detail.tagline.as_deref()),
            runtime: format_runtime(detail.runtime_minutes),
            genres: format_genres(&detail.genres),
            release: format_date(detail.release_date.as_deref()),
            rating: format_vote(detail.vote_average),
            vote_count: detail.vote_count,
            overview: detail.overview.clone(),
        }
    }

    pub fn render_page(&self, view: &SearchView) -> Result<String, minijinja::Error> {
        let page = self.page_model(view);
        self.env.get_template("page.html")?.render(context! { page })
    }
}

pub fn placeholder_svg(width: u32, height: u32) -> String {
    format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
            r##"<rect width="100%" height="100%" fill="#374151"/>"##,
            r##"<text x="50%" y="50%" fill="#9ca3af" font-family="sans-serif" font-size="24" "##,
            r##"text-anchor="middle" dominant-baseline="middle">{w} × {h}</text></svg>"##
        ),
        w = width,
        h = height
    )
}
