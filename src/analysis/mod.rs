//! Value analysis over the merged player dataset
//!
//! - `dominance`: candidate selection and the undominated frontier
//! - `metric`: output measures players are compared on
//! - `filter`: league/club narrowing

pub mod dominance;
pub mod filter;
pub mod metric;


pub use dominance::{find_candidates, FindOptions, PositionFilter, MIN_COMPARISON_COUNT};
pub use filter::{filter_by_league_and_club, filter_top5, Affiliation, TOP_5_LEAGUES};
pub use metric::Metric;
