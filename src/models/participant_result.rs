//! Per-participant accumulators and the ordered map that holds them.

use crate::models::match_up::ParticipantId;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Statistics of one participant over the matchUps of a group.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResult {
    pub match_ups_won: u32,
    pub match_ups_lost: u32,
    pub match_ups_cancelled: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
    pub tiebreaks_won: u32,
    pub tiebreaks_lost: u32,
    pub tie_match_ups_won: u32,
    pub tie_match_ups_lost: u32,
    pub tie_singles_won: u32,
    pub tie_singles_lost: u32,
    pub tie_doubles_won: u32,
    pub tie_doubles_lost: u32,
    /// Losses by walkover.
    pub walkovers: u32,
    /// Losses by default.
    pub defaults: u32,
    pub retirements: u32,
    /// Walkovers and defaults, single or double.
    pub all_defaults: u32,
    /// Opponents beaten.
    pub victories: Vec<ParticipantId>,
    /// Opponents lost to.
    pub defeats: Vec<ParticipantId>,

    pub match_ups_pct: f64,
    pub tie_match_ups_pct: f64,
    pub sets_pct: f64,
    pub games_pct: f64,
    pub points_pct: f64,
    pub sets_diff: i32,
    pub games_diff: i32,
    pub points_diff: i32,
    /// "won/lost" matchUps.
    pub result: String,
    /// "won/lost" games.
    pub games: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ties: Option<u32>,
    #[serde(rename = "GEMscore", skip_serializing_if = "Option::is_none")]
    pub gem_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional_order: Option<u32>,
}

impl ParticipantResult {
    /// MatchUps that reached an outcome for this participant.
    pub fn match_ups_accounted(&self) -> u32 {
        self.match_ups_won + self.match_ups_lost + self.match_ups_cancelled
    }

    pub fn add_sets(&mut self, won: u32, lost: u32) {
        self.sets_won = self.sets_won.saturating_add(won);
        self.sets_lost = self.sets_lost.saturating_add(lost);
    }

    pub fn add_games(&mut self, won: u32, lost: u32) {
        self.games_won = self.games_won.saturating_add(won);
        self.games_lost = self.games_lost.saturating_add(lost);
    }

    pub fn add_points(&mut self, won: u32, lost: u32) {
        self.points_won = self.points_won.saturating_add(won);
        self.points_lost = self.points_lost.saturating_add(lost);
    }

    pub fn add_tiebreaks(&mut self, won: u32, lost: u32) {
        self.tiebreaks_won = self.tiebreaks_won.saturating_add(won);
        self.tiebreaks_lost = self.tiebreaks_lost.saturating_add(lost);
    }
}

/// Participant results keyed by id, iterated in first-reference order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticipantResults {
    ids: Vec<ParticipantId>,
    results: HashMap<ParticipantId, ParticipantResult>,
}

impl ParticipantResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for `id`, created empty on first reference.
    pub fn entry(&mut self, id: &ParticipantId) -> &mut ParticipantResult {
        if !self.results.contains_key(id) {
            self.ids.push(id.clone());
        }
        self.results.entry(id.clone()).or_default()
    }

    pub fn get(&self, id: &str) -> Option<&ParticipantResult> {
        self.results.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ParticipantResult> {
        self.results.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.results.contains_key(id)
    }

    /// Ids in first-reference order.
    pub fn ids(&self) -> &[ParticipantId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantResult)> {
        self.ids
            .iter()
            .filter_map(move |id| self.results.get(id).map(|r| (id, r)))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ParticipantResult> {
        self.results.values_mut()
    }
}

impl Serialize for ParticipantResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, result) in self.iter() {
            map.serialize_entry(id, result)?;
        }
        map.end()
    }
}
