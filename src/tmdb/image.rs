use crate::config::TmdbConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    Card,
    Overlay,
}

impl PosterSize {
    /// Local placeholder used when a result has no poster path at all.
    pub fn placeholder(&self) -> &'static str {
        match self {
            PosterSize::Card => "/api/placeholder/500/750",
            PosterSize::Overlay => "/api/placeholder/300/450",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageHost {
    base: String,
    card_size: String,
    overlay_size: String,
}

impl ImageHost {
    pub fn new(base: &str, card_size: &str, overlay_size: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            card_size: card_size.to_string(),
            overlay_size: overlay_size.to_string(),
        }
    }

    pub fn from_config(config: &TmdbConfig) -> Self {
        Self::new(
            &config.image_base,
            &config.card_poster_size,
            &config.overlay_poster_size,
        )
    }

    pub fn poster_url(&self, poster_path: Option<&str>, size: PosterSize) -> String {
        let path = match poster_path.map(|p| p.trim_start_matches('/')) {
            Some(p) if !p.is_empty() => p,
            _ => return size.placeholder().to_string(),
        };
        let token = match size {
            PosterSize::Card => &self.card_size,
            PosterSize::Overlay => &self.overlay_size,
        };
        format!("{}/{}/{}", self.base, token, path)
    }
}
