//! Pre-parsed matchUp format: best-of count and set formats.

use serde::{Deserialize, Serialize};

/// What a set is counted in.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Based {
    #[default]
    Games,
    Points,
}

/// A set played as a single tiebreak (e.g. a match tiebreak to 10).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TiebreakSet {
    pub tiebreak_to: u32,
}

/// Format of one set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetFormat {
    pub set_to: Option<u32>,
    /// Games-all score at which a tiebreak is played; None for advantage sets.
    pub tiebreak_at: Option<u32>,
    pub based: Based,
    pub tiebreak_set: Option<TiebreakSet>,
}

impl Default for SetFormat {
    fn default() -> Self {
        Self {
            set_to: Some(6),
            tiebreak_at: Some(6),
            based: Based::Games,
            tiebreak_set: None,
        }
    }
}

impl SetFormat {
    pub fn is_points_based(&self) -> bool {
        self.based == Based::Points
    }

    /// The whole set is one tiebreak.
    pub fn is_tiebreak_set(&self) -> bool {
        self.tiebreak_set.is_some()
    }

    /// Games needed to win the set (0 when the set is not games-based).
    pub fn games_for_set(&self) -> u32 {
        if self.is_tiebreak_set() || self.is_points_based() {
            0
        } else {
            self.set_to.unwrap_or(0)
        }
    }

    /// Games the winner must reach when the loser has `loser_games`.
    pub fn complement(&self, loser_games: u32) -> u32 {
        let set_to = self.set_to.unwrap_or(0);
        match self.tiebreak_at {
            Some(tiebreak_at) if loser_games.saturating_add(1) >= tiebreak_at => {
                tiebreak_at.saturating_add(1)
            }
            Some(_) if loser_games.saturating_add(2) <= set_to => set_to,
            Some(_) => set_to.saturating_add(1),
            None => set_to.max(loser_games.saturating_add(2)),
        }
    }

    /// A games-based set score that could not have ended yet.
    pub fn is_unfinished(&self, scores: [u32; 2]) -> bool {
        if self.is_tiebreak_set() || self.is_points_based() {
            return false;
        }
        let high = scores[0].max(scores[1]);
        let low = scores[0].min(scores[1]);
        let set_to = self.set_to.unwrap_or(0);
        match self.tiebreak_at {
            Some(tiebreak_at) if low == tiebreak_at && high == tiebreak_at.saturating_add(1) => {
                false
            }
            _ => high < set_to || high - low < 2,
        }
    }
}

/// Parsed matchUp format, e.g. best of 3 sets to 6 with a tiebreak at 6.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchUpFormat {
    pub best_of: u32,
    pub set_format: SetFormat,
    pub final_set_format: Option<SetFormat>,
}

impl Default for MatchUpFormat {
    fn default() -> Self {
        Self {
            best_of: 3,
            set_format: SetFormat::default(),
            final_set_format: None,
        }
    }
}

impl MatchUpFormat {
    /// Sets needed to win the matchUp: ceil(bestOf / 2).
    pub fn sets_to_win(&self) -> u32 {
        self.best_of.max(1).div_ceil(2)
    }

    /// Format of the set at the given 1-based position.
    pub fn set_format_for(&self, set_number: u32) -> &SetFormat {
        match &self.final_set_format {
            Some(final_set) if set_number == self.best_of && self.best_of > 1 => final_set,
            _ => &self.set_format,
        }
    }
}
