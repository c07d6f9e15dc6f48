pub mod normalize;
pub mod recommendations;
pub mod title_index;
pub mod title_search;

pub use recommendations::{CoRatingRecommender, GenreBonus, Recommender};
pub use title_search::TitleSearcher;
