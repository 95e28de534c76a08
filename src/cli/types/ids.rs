//! ID types for scraped players.

use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for upstream player identifiers.
///
/// Identifiers are opaque strings assigned by the source site. They are
/// stable across fetch cycles and unique per player, so they key both the
/// roster and the on-disk stats cache.
///
/// # Examples
///
/// ```rust
/// use value_scout::PlayerId;
///
/// let id = PlayerId::new("418560");
/// assert_eq!(id.as_str(), "418560");
/// assert_eq!(id.to_string(), "418560");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::invalid_input("player id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
