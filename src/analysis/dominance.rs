//! Bargain / overpriced detection over the player set.
//!
//! Two passes. First every eligible player is scored by how many peers it
//! beats while costing no more (bargain direction) or loses to while costing
//! no less (overpriced direction); players under the threshold drop out.
//! Then any remaining candidate that another candidate dominates in the same
//! direction is removed, leaving the undominated frontier.
//!
//! Value comparisons are non-strict, output comparisons strict.

use rayon::prelude::*;
use std::fmt;

use crate::{
    analysis::metric::Metric,
    cli::types::position::{
        can_be_outperformer_against, can_be_underperformer_against, is_attacking_position,
    },
    models::{Candidate, PlayerStats},
};

pub const MIN_COMPARISON_COUNT: usize = 3;

/// Predicate over a player's effective position deciding candidacy.
pub type PositionFilter = fn(&str) -> bool;

#[derive(Clone, Copy)]
pub struct FindOptions {
    /// `true` looks for bargains, `false` for overpriced players.
    pub candidate_outperforms: bool,
    pub min_minutes: Option<u32>,
    pub sort_ascending: bool,
    pub min_comparisons: usize,
    pub metric: Metric,
    pub eligibility: PositionFilter,
    /// Also require the dominating player to have played at least as many
    /// minutes as the dominated one.
    pub minutes_dominance: bool,
}

impl FindOptions {
    /// Cheap players beating pricier ones, cheapest first.
    pub fn bargains() -> Self {
        Self {
            candidate_outperforms: true,
            min_minutes: None,
            sort_ascending: true,
            min_comparisons: MIN_COMPARISON_COUNT,
            metric: Metric::GoalContributions,
            eligibility: is_attacking_position,
            minutes_dominance: false,
        }
    }

    /// Expensive players beaten by cheaper ones, most expensive first.
    pub fn overpriced() -> Self {
        Self {
            candidate_outperforms: false,
            sort_ascending: false,
            ..Self::bargains()
        }
    }

    pub fn with_min_minutes(mut self, min_minutes: Option<u32>) -> Self {
        self.min_minutes = min_minutes;
        self
    }

    pub fn with_min_comparisons(mut self, n: usize) -> Self {
        self.min_comparisons = n;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_eligibility(mut self, eligibility: PositionFilter) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_minutes_dominance(mut self, on: bool) -> Self {
        self.minutes_dominance = on;
        self
    }

    pub fn with_sort_ascending(mut self, ascending: bool) -> Self {
        self.sort_ascending = ascending;
        self
    }

    fn played_at_least(&self, a: &PlayerStats, b: &PlayerStats) -> bool {
        !self.minutes_dominance || a.minutes.unwrap_or(0) >= b.minutes.unwrap_or(0)
    }

    fn is_eligible(&self, player: &PlayerStats) -> bool {
        let Some(minutes) = player.minutes else {
            return false;
        };
        if self.min_minutes.is_some_and(|min| minutes < min) {
            return false;
        }
        (self.eligibility)(player.effective_position())
    }

    /// Whether `peer` counts toward `player`'s comparison count.
    fn counts_against(&self, player: &PlayerStats, peer: &PlayerStats) -> bool {
        if peer.id() == player.id() {
            return false;
        }
        let (pos, peer_pos) = (player.effective_position(), peer.effective_position());
        if self.candidate_outperforms {
            peer.market_value() >= player.market_value()
                && self.metric.strictly_outperforms(player, peer)
                && can_be_underperformer_against(peer_pos, pos)
                && self.played_at_least(player, peer)
        } else {
            peer.market_value() <= player.market_value()
                && self.metric.strictly_outperforms(peer, player)
                && can_be_outperformer_against(peer_pos, pos)
                && self.played_at_least(peer, player)
        }
    }

    /// Whether candidate `other` knocks `player` off the frontier.
    fn dominated_by(&self, player: &PlayerStats, other: &PlayerStats) -> bool {
        if other.id() == player.id() {
            return false;
        }
        let (pos, other_pos) = (player.effective_position(), other.effective_position());
        if self.candidate_outperforms {
            can_be_underperformer_against(pos, other_pos)
                && other.market_value() <= player.market_value()
                && self.metric.strictly_outperforms(other, player)
                && self.played_at_least(other, player)
        } else {
            can_be_underperformer_against(other_pos, pos)
                && other.market_value() >= player.market_value()
                && self.metric.strictly_outperforms(player, other)
                && self.played_at_least(player, other)
        }
    }
}

impl fmt::Debug for FindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOptions")
            .field("candidate_outperforms", &self.candidate_outperforms)
            .field("min_minutes", &self.min_minutes)
            .field("sort_ascending", &self.sort_ascending)
            .field("min_comparisons", &self.min_comparisons)
            .field("metric", &self.metric)
            .field("minutes_dominance", &self.minutes_dominance)
            .finish_non_exhaustive()
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::bargains()
    }
}

/// Number of peers in `pool` that `player` is compared against under `options`.
pub fn count_comparisons(player: &PlayerStats, pool: &[PlayerStats], options: &FindOptions) -> usize {
    pool.iter()
        .filter(|peer| options.counts_against(player, peer))
        .count()
}

/// Pass one: eligible players whose comparison count reaches the threshold.
/// Keeps input order.
pub fn select_candidates(players: &[PlayerStats], options: &FindOptions) -> Vec<Candidate> {
    players
        .par_iter()
        .filter(|p| options.is_eligible(p))
        .filter_map(|p| {
            let count = count_comparisons(p, players, options);
            (count >= options.min_comparisons).then(|| Candidate {
                player: p.clone(),
                count,
            })
        })
        .collect()
}

/// Pass two: drop candidates dominated by another candidate.
pub fn undominated(candidates: Vec<Candidate>, options: &FindOptions) -> Vec<Candidate> {
    let keep: Vec<bool> = candidates
        .par_iter()
        .map(|c| {
            !candidates
                .iter()
                .any(|other| options.dominated_by(&c.player, &other.player))
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(c, keep)| keep.then_some(c))
        .collect()
}

/// The undominated frontier for `players`, sorted by market value.
///
/// Pure and deterministic; an input with nothing eligible yields an empty list.
pub fn find_candidates(players: &[PlayerStats], options: &FindOptions) -> Vec<Candidate> {
    let mut frontier = undominated(select_candidates(players, options), options);
    if options.sort_ascending {
        frontier.sort_by_key(|c| c.player.market_value());
    } else {
        frontier.sort_by_key(|c| std::cmp::Reverse(c.player.market_value()));
    }
    frontier
}
