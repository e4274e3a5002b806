pub mod card;
pub mod format;
pub mod render;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use card::ResultCard;
pub use render::Renderer;
pub use search::SearchView;
