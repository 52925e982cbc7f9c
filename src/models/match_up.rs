//! MatchUp, Side, Score and status enums as delivered by the draw/scoring collaborators.

use crate::models::format::MatchUpFormat;
use serde::{Deserialize, Serialize};

/// Identifier of a participant (individual, pair or team) as provided by the caller.
pub type ParticipantId = String;

/// Identifier of a single matchUp.
pub type MatchUpId = String;

/// Identifier of the structure (round robin group) a matchUp belongs to.
pub type StructureId = String;

/// Kind of contest.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchUpType {
    #[default]
    Singles,
    Doubles,
    /// Team contest; the individual rubbers live in `tie_match_ups`.
    Team,
}

/// Lifecycle status of a matchUp.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchUpStatus {
    #[default]
    ToBePlayed,
    InProgress,
    Suspended,
    AwaitingResult,
    Incomplete,
    NotPlayed,
    Completed,
    Retired,
    Walkover,
    Defaulted,
    DoubleWalkover,
    DoubleDefault,
    Abandoned,
    Cancelled,
    DeadRubber,
    Bye,
}

impl MatchUpStatus {
    /// Terminal statuses: nothing more will be recorded for the matchUp.
    pub fn is_complete(self) -> bool {
        use MatchUpStatus::*;
        matches!(
            self,
            Completed
                | Retired
                | Walkover
                | Defaulted
                | DoubleWalkover
                | DoubleDefault
                | Abandoned
                | Cancelled
                | DeadRubber
                | Bye
        )
    }

    /// Terminal statuses that never produce a winner.
    pub fn is_cancelled(self) -> bool {
        use MatchUpStatus::*;
        matches!(
            self,
            Abandoned | Cancelled | DeadRubber | DoubleWalkover | DoubleDefault
        )
    }
}

/// One side of a matchUp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Side {
    /// 1 or 2. When absent the position in `sides` decides.
    pub side_number: Option<u8>,
    /// None when the draw has not placed anyone, or the record is malformed.
    pub participant_id: Option<ParticipantId>,
    pub participant_name: Option<String>,
}

/// Score of one set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetScore {
    pub set_number: Option<u32>,
    pub side1_score: Option<u32>,
    pub side2_score: Option<u32>,
    pub side1_tiebreak_score: Option<u32>,
    pub side2_tiebreak_score: Option<u32>,
    pub winning_side: Option<u8>,
}

impl SetScore {
    /// Scores as `[side1, side2]`, absent treated as zero.
    pub fn scores(&self) -> [u32; 2] {
        [
            self.side1_score.unwrap_or(0),
            self.side2_score.unwrap_or(0),
        ]
    }

    pub fn tiebreak_scores(&self) -> [u32; 2] {
        [
            self.side1_tiebreak_score.unwrap_or(0),
            self.side2_tiebreak_score.unwrap_or(0),
        ]
    }

    pub fn has_tiebreak(&self) -> bool {
        self.side1_tiebreak_score.is_some() || self.side2_tiebreak_score.is_some()
    }

    /// Winner index (0 or 1), ignoring out-of-range values.
    pub fn winner_index(&self) -> Option<usize> {
        side_index(self.winning_side)
    }
}

/// Parsed score of a matchUp.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Score {
    pub sets: Vec<SetScore>,
    /// Display strings; never read by the tally.
    pub score_string_side1: Option<String>,
    pub score_string_side2: Option<String>,
}

/// One collection (e.g. "singles", "doubles") of a team tie format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionDefinition {
    pub collection_id: String,
    /// Explicit value awarded for winning the collection, set when scores are entered by hand.
    pub score_value: Option<u32>,
}

/// Team tie format: which collections make up a team matchUp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TieFormat {
    pub collection_definitions: Vec<CollectionDefinition>,
}

/// A single matchUp of a round robin group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchUp {
    pub match_up_id: MatchUpId,
    pub structure_id: StructureId,
    pub match_up_type: MatchUpType,
    /// Pre-parsed format; falls back to the group format when absent.
    pub match_up_format: Option<MatchUpFormat>,
    pub match_up_status: MatchUpStatus,
    pub winning_side: Option<u8>,
    pub sides: Vec<Side>,
    pub score: Option<Score>,
    /// Individual rubbers of a TEAM matchUp.
    pub tie_match_ups: Vec<MatchUp>,
    pub tie_format: Option<TieFormat>,
    /// Team score entered manually rather than derived from the rubbers.
    pub disable_auto_calc: bool,
    pub draw_positions: Vec<u32>,
}

impl MatchUp {
    /// The side with the given number (1 or 2).
    pub fn side(&self, side_number: u8) -> Option<&Side> {
        self.sides
            .iter()
            .find(|s| s.side_number == Some(side_number))
            .or_else(|| {
                self.sides
                    .get(usize::from(side_number).wrapping_sub(1))
                    .filter(|s| s.side_number.is_none())
            })
    }

    /// Participant ids of side 1 and side 2.
    pub fn participant_ids(&self) -> [Option<&ParticipantId>; 2] {
        [1, 2].map(|n| self.side(n).and_then(|s| s.participant_id.as_ref()))
    }

    /// Winner index (0 or 1), ignoring out-of-range values.
    pub fn winner_index(&self) -> Option<usize> {
        side_index(self.winning_side)
    }

    pub fn is_team(&self) -> bool {
        self.match_up_type == MatchUpType::Team
    }

    pub fn is_bye(&self) -> bool {
        self.match_up_status == MatchUpStatus::Bye
    }

    pub fn sets(&self) -> &[SetScore] {
        self.score.as_ref().map(|s| s.sets.as_slice()).unwrap_or(&[])
    }

    /// Team score was entered by hand and every collection carries an explicit value.
    pub fn manual_games_override(&self) -> bool {
        self.disable_auto_calc
            && self.tie_format.as_ref().is_some_and(|tf| {
                !tf.collection_definitions.is_empty()
                    && tf
                        .collection_definitions
                        .iter()
                        .all(|c| c.score_value.is_some())
            })
    }
}

pub(crate) fn side_index(winning_side: Option<u8>) -> Option<usize> {
    match winning_side {
        Some(1) => Some(0),
        Some(2) => Some(1),
        _ => None,
    }
}
