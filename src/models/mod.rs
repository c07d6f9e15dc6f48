pub mod rating;
pub mod recommendation;
pub mod title;

pub use rating::{Rating, RatingTable, APPROVAL_THRESHOLD};
pub use recommendation::{GenreFilter, Recommendation, SearchHit};
pub use title::{MovieId, TitleRecord, UserId};
