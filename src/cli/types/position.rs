//! Football position classes and the comparison rules built on them.

use serde::Serialize;
use std::fmt;

/// Role-class of a raw position label, ordered from least to most attacking.
///
/// The derived `Ord` follows declaration order, which matches [`rank`].
///
/// [`rank`]: PositionClass::rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionClass {
    Other,
    CentralMidfield,
    AttackingMidfield,
    Forward,
    CentreForward,
}

/// Labels that never enter an attacking comparison as the weaker side.
pub const DEFENSIVE_POSITIONS: [&str; 7] = [
    "Goalkeeper",
    "Centre-Back",
    "Left-Back",
    "Right-Back",
    "Defensive Midfield",
    "Left Wing-Back",
    "Right Wing-Back",
];

impl PositionClass {
    /// Map a raw position label to its class. Unmapped labels are `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Centre-Forward" => PositionClass::CentreForward,
            "Left Winger" | "Right Winger" | "Second Striker" => PositionClass::Forward,
            "Attacking Midfield" => PositionClass::AttackingMidfield,
            "Central Midfield" => PositionClass::CentralMidfield,
            _ => PositionClass::Other,
        }
    }

    /// 1 (other) through 5 (centre-forward).
    pub fn rank(self) -> u8 {
        match self {
            PositionClass::Other => 1,
            PositionClass::CentralMidfield => 2,
            PositionClass::AttackingMidfield => 3,
            PositionClass::Forward => 4,
            PositionClass::CentreForward => 5,
        }
    }
}

impl fmt::Display for PositionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionClass::Other => "other",
            PositionClass::CentralMidfield => "central-midfield",
            PositionClass::AttackingMidfield => "attacking-midfield",
            PositionClass::Forward => "forward",
            PositionClass::CentreForward => "centre-forward",
        };
        write!(f, "{}", s)
    }
}

pub fn position_rank(label: &str) -> u8 {
    PositionClass::from_label(label).rank()
}

pub fn is_defensive_position(label: &str) -> bool {
    DEFENSIVE_POSITIONS.contains(&label.trim())
}

/// Default candidate-pool filter: anything that is neither defensive nor a
/// central midfielder.
pub fn is_attacking_position(label: &str) -> bool {
    !is_defensive_position(label) && label.trim() != "Central Midfield"
}

/// Whether `candidate` may be reported as underperforming relative to `target`.
///
/// A defender is never an underperformer against a non-defender; otherwise
/// the candidate must be at least as attacking as the target.
pub fn can_be_underperformer_against(candidate: &str, target: &str) -> bool {
    if is_defensive_position(candidate) && !is_defensive_position(target) {
        return false;
    }
    position_rank(candidate) >= position_rank(target)
}

/// Whether `candidate` may be credited with outperforming `target`.
///
/// Not the inverse of [`can_be_underperformer_against`]: there is no
/// defensive exception here.
pub fn can_be_outperformer_against(candidate: &str, target: &str) -> bool {
    position_rank(candidate) <= position_rank(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_class_mapping() {
        assert_eq!(
            PositionClass::from_label("Centre-Forward"),
            PositionClass::CentreForward
        );
        assert_eq!(PositionClass::from_label("Left Winger"), PositionClass::Forward);
        assert_eq!(PositionClass::from_label("Right Winger"), PositionClass::Forward);
        assert_eq!(
            PositionClass::from_label("Second Striker"),
            PositionClass::Forward
        );
        assert_eq!(
            PositionClass::from_label("Attacking Midfield"),
            PositionClass::AttackingMidfield
        );
        assert_eq!(
            PositionClass::from_label("Central Midfield"),
            PositionClass::CentralMidfield
        );
        assert_eq!(PositionClass::from_label("Goalkeeper"), PositionClass::Other);
        assert_eq!(PositionClass::from_label("Libero"), PositionClass::Other);
        assert_eq!(PositionClass::from_label(""), PositionClass::Other);
    }

    #[test]
    fn test_rank_matches_ordering() {
        let classes = [
            PositionClass::Other,
            PositionClass::CentralMidfield,
            PositionClass::AttackingMidfield,
            PositionClass::Forward,
            PositionClass::CentreForward,
        ];
        for pair in classes.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(PositionClass::Other.rank(), 1);
        assert_eq!(PositionClass::CentreForward.rank(), 5);
    }

    #[test]
    fn test_display_slugs() {
        assert_eq!(PositionClass::CentreForward.to_string(), "centre-forward");
        assert_eq!(PositionClass::CentralMidfield.to_string(), "central-midfield");
        assert_eq!(PositionClass::Other.to_string(), "other");
    }

    #[test]
    fn test_defensive_positions() {
        for label in DEFENSIVE_POSITIONS {
            assert!(is_defensive_position(label), "{label} should be defensive");
            assert!(!is_attacking_position(label));
        }
        assert!(!is_defensive_position("Centre-Forward"));
        assert!(!is_defensive_position("Central Midfield"));
    }

    #[test]
    fn test_attacking_positions_exclude_central_midfield() {
        assert!(is_attacking_position("Centre-Forward"));
        assert!(is_attacking_position("Left Winger"));
        assert!(is_attacking_position("Attacking Midfield"));
        assert!(!is_attacking_position("Central Midfield"));
        // Unmapped, non-defensive labels are still attacking for pool purposes.
        assert!(is_attacking_position("Right Midfield"));
    }

    #[test]
    fn test_defender_never_underperforms_attacker() {
        assert!(!can_be_underperformer_against("Centre-Back", "Centre-Forward"));
        // Rank alone would allow this one (1 >= 1); the defensive rule blocks it.
        assert!(!can_be_underperformer_against("Centre-Back", "Right Midfield"));
        // Defender against defender falls through to the rank rule.
        assert!(can_be_underperformer_against("Centre-Back", "Left-Back"));
    }

    #[test]
    fn test_underperformer_requires_equal_or_higher_rank() {
        assert!(can_be_underperformer_against("Centre-Forward", "Left Winger"));
        assert!(can_be_underperformer_against("Left Winger", "Right Winger"));
        assert!(!can_be_underperformer_against("Central Midfield", "Centre-Forward"));
    }

    #[test]
    fn test_outperformer_requires_equal_or_lower_rank() {
        assert!(can_be_outperformer_against("Central Midfield", "Centre-Forward"));
        assert!(can_be_outperformer_against("Centre-Forward", "Centre-Forward"));
        assert!(!can_be_outperformer_against("Centre-Forward", "Attacking Midfield"));
        // No defensive exception on this side.
        assert!(can_be_outperformer_against("Centre-Back", "Centre-Forward"));
    }

    #[test]
    fn test_predicates_are_not_inverses() {
        // Same rank: both hold.
        assert!(can_be_underperformer_against("Left Winger", "Second Striker"));
        assert!(can_be_outperformer_against("Left Winger", "Second Striker"));
        // Defender vs attacker: neither "under" nor the rank-flipped "out".
        assert!(!can_be_underperformer_against("Goalkeeper", "Left Winger"));
        assert!(can_be_outperformer_against("Goalkeeper", "Left Winger"));
    }
}
