//! Type-safe wrappers and enums for scraped football data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::PlayerId;
pub use position::PositionClass;
pub use time::SeasonId;
