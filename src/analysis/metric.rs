//! Output metrics the dominance engine compares players on.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::{Result, ScoutError},
    models::PlayerStats,
};

#[derive(Clone, Copy)]
pub enum Metric {
    /// Goals plus assists.
    GoalContributions,
    Minutes,
    /// The dataset's `points` field; missing counts as zero.
    Points,
    Custom(fn(&PlayerStats) -> f64),
}

impl Metric {
    pub fn value(&self, player: &PlayerStats) -> f64 {
        match self {
            Metric::GoalContributions => f64::from(player.goal_contributions()),
            Metric::Minutes => f64::from(player.minutes.unwrap_or(0)),
            Metric::Points => player.points.unwrap_or(0.0),
            Metric::Custom(f) => f(player),
        }
    }

    /// `a` does strictly better than `b`. Ties are never an outperformance.
    pub fn strictly_outperforms(&self, a: &PlayerStats, b: &PlayerStats) -> bool {
        self.value(a) > self.value(b)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::GoalContributions => "goals+assists",
            Metric::Minutes => "minutes",
            Metric::Points => "points",
            Metric::Custom(_) => "custom",
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::GoalContributions
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metric({})", self.name())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ga" | "g+a" | "goals+assists" | "goal-contributions" => Ok(Metric::GoalContributions),
            "minutes" | "mins" => Ok(Metric::Minutes),
            "points" | "pts" => Ok(Metric::Points),
            _ => Err(ScoutError::UnknownMetric {
                name: s.to_string(),
            }),
        }
    }
}
