//! Core utilities shared across the crate
//!
//! - `cache`: file locations, atomic file writes and the in-memory page cache

pub mod cache;

// Re-export commonly used items for convenience
pub use cache::{
    default_cache_path, default_data_dir, try_read_to_string, write_string_atomic,
    ResponseCache, DATASET_FILE,
};
