pub mod favorites;
pub mod latest;
pub mod movie_detail;
pub mod providers;
pub mod recommendations;
pub mod title_search;

pub use favorites::{FavoritesReader, FavoritesStore, FavoritesWriter};
pub use latest::{LatestRequest, Ticket};
pub use movie_detail::{DetailFetcher, DetailPage, DetailView, PageLoad};
pub use providers::{MovieProvider, OmdbProvider};
pub use recommendations::RecommendationAssembler;
