//! Tally policy: tie-break directives, credit rules and GEMscore configuration.

use crate::models::match_up::MatchUpStatus;
use crate::models::participant_result::ParticipantResult;
use serde::{Deserialize, Serialize};

/// A participant statistic that can group or separate participants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TallyAttribute {
    MatchUpsWon,
    MatchUpsLost,
    MatchUpsPct,
    TieMatchUpsWon,
    TieMatchUpsLost,
    TieMatchUpsPct,
    TieSinglesWon,
    TieSinglesLost,
    TieDoublesWon,
    TieDoublesLost,
    SetsWon,
    SetsLost,
    SetsPct,
    SetsDiff,
    GamesWon,
    GamesLost,
    GamesPct,
    GamesDiff,
    PointsWon,
    PointsLost,
    PointsPct,
    PointsDiff,
    Walkovers,
    Defaults,
    Retirements,
    AllDefaults,
}

impl TallyAttribute {
    /// Name as it appears in policy documents and reports.
    pub fn name(self) -> &'static str {
        use TallyAttribute::*;
        match self {
            MatchUpsWon => "matchUpsWon",
            MatchUpsLost => "matchUpsLost",
            MatchUpsPct => "matchUpsPct",
            TieMatchUpsWon => "tieMatchUpsWon",
            TieMatchUpsLost => "tieMatchUpsLost",
            TieMatchUpsPct => "tieMatchUpsPct",
            TieSinglesWon => "tieSinglesWon",
            TieSinglesLost => "tieSinglesLost",
            TieDoublesWon => "tieDoublesWon",
            TieDoublesLost => "tieDoublesLost",
            SetsWon => "setsWon",
            SetsLost => "setsLost",
            SetsPct => "setsPct",
            SetsDiff => "setsDiff",
            GamesWon => "gamesWon",
            GamesLost => "gamesLost",
            GamesPct => "gamesPct",
            GamesDiff => "gamesDiff",
            PointsWon => "pointsWon",
            PointsLost => "pointsLost",
            PointsPct => "pointsPct",
            PointsDiff => "pointsDiff",
            Walkovers => "walkovers",
            Defaults => "defaults",
            Retirements => "retirements",
            AllDefaults => "allDefaults",
        }
    }

    /// Attributes accepted as the primary grouping key.
    pub fn is_group_order_key(self) -> bool {
        use TallyAttribute::*;
        matches!(
            self,
            MatchUpsWon
                | TieMatchUpsWon
                | TieSinglesWon
                | TieDoublesWon
                | SetsWon
                | GamesWon
                | PointsWon
                | SetsDiff
                | GamesDiff
                | PointsDiff
        )
    }

    /// Value of this attribute for one participant.
    pub fn value(self, result: &ParticipantResult) -> f64 {
        use TallyAttribute::*;
        match self {
            MatchUpsWon => f64::from(result.match_ups_won),
            MatchUpsLost => f64::from(result.match_ups_lost),
            MatchUpsPct => result.match_ups_pct,
            TieMatchUpsWon => f64::from(result.tie_match_ups_won),
            TieMatchUpsLost => f64::from(result.tie_match_ups_lost),
            TieMatchUpsPct => result.tie_match_ups_pct,
            TieSinglesWon => f64::from(result.tie_singles_won),
            TieSinglesLost => f64::from(result.tie_singles_lost),
            TieDoublesWon => f64::from(result.tie_doubles_won),
            TieDoublesLost => f64::from(result.tie_doubles_lost),
            SetsWon => f64::from(result.sets_won),
            SetsLost => f64::from(result.sets_lost),
            SetsPct => result.sets_pct,
            SetsDiff => f64::from(result.sets_diff),
            GamesWon => f64::from(result.games_won),
            GamesLost => f64::from(result.games_lost),
            GamesPct => result.games_pct,
            GamesDiff => f64::from(result.games_diff),
            PointsWon => f64::from(result.points_won),
            PointsLost => f64::from(result.points_lost),
            PointsPct => result.points_pct,
            PointsDiff => f64::from(result.points_diff),
            Walkovers => f64::from(result.walkovers),
            Defaults => f64::from(result.defaults),
            Retirements => f64::from(result.retirements),
            AllDefaults => f64::from(result.all_defaults),
        }
    }

    /// Exponent of the power-of-ten weight this attribute carries in the GEMscore.
    pub fn gem_score_weight(self) -> Option<i32> {
        use TallyAttribute::*;
        match self {
            MatchUpsPct => Some(20),
            TieMatchUpsPct => Some(16),
            SetsPct => Some(12),
            GamesPct => Some(8),
            PointsPct => Some(4),
            _ => None,
        }
    }
}

impl std::fmt::Display for TallyAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One tie-break rule: separate tied participants by an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyDirective {
    pub attribute: TallyAttribute,
    /// Lower values rank higher (e.g. fewer defaults).
    #[serde(default)]
    pub reversed: bool,
    /// Recompute statistics from matchUps among the tied participants only.
    #[serde(default)]
    pub ids_filter: bool,
    /// Skip this directive when more participants than this are tied.
    #[serde(default)]
    pub max_participants: Option<usize>,
    /// Do not try head-to-head on pairs this directive leaves tied.
    #[serde(default)]
    pub disable_head_to_head: bool,
}

impl TallyDirective {
    pub fn new(attribute: TallyAttribute) -> Self {
        Self {
            attribute,
            reversed: false,
            ids_filter: false,
            max_participants: None,
            disable_head_to_head: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn ids_filter(mut self) -> Self {
        self.ids_filter = true;
        self
    }

    pub fn max_participants(mut self, max: usize) -> Self {
        self.max_participants = Some(max);
        self
    }

    pub fn applies_to(&self, tied: usize) -> bool {
        self.max_participants.map_or(true, |max| tied <= max)
    }
}

/// The default cascade: results, then discipline, then ratios, then ratios among the tied only.
pub fn default_tally_directives() -> Vec<TallyDirective> {
    use TallyAttribute::*;
    vec![
        TallyDirective::new(MatchUpsPct),
        TallyDirective::new(AllDefaults).reversed(),
        TallyDirective::new(Defaults).reversed(),
        TallyDirective::new(Walkovers).reversed(),
        TallyDirective::new(Retirements).reversed(),
        TallyDirective::new(SetsPct),
        TallyDirective::new(GamesPct),
        TallyDirective::new(PointsPct),
        TallyDirective::new(MatchUpsPct).ids_filter(),
        TallyDirective::new(SetsPct).ids_filter(),
        TallyDirective::new(GamesPct).ids_filter(),
        TallyDirective::new(PointsPct).ids_filter(),
    ]
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadToHeadPolicy {
    pub disabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_precision() -> u32 {
    3
}

/// Round robin tally policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyPolicy {
    /// Primary grouping attribute; ignored unless it is a valid group order key.
    #[serde(default)]
    pub group_order_key: Option<TallyAttribute>,
    #[serde(default = "default_tally_directives")]
    pub tally_directives: Vec<TallyDirective>,
    #[serde(default)]
    pub head_to_head: HeadToHeadPolicy,
    #[serde(default)]
    pub sets_credit_for_walkovers: bool,
    #[serde(default)]
    pub sets_credit_for_defaults: bool,
    #[serde(default)]
    pub sets_credit_for_retirements: bool,
    #[serde(default)]
    pub games_credit_for_walkovers: bool,
    #[serde(default)]
    pub games_credit_for_defaults: bool,
    #[serde(default = "default_true")]
    pub games_credit_for_tiebreak_sets: bool,
    /// MatchUps with these statuses are ignored (TEAM matchUps excepted).
    #[serde(default)]
    pub exclude_match_up_statuses: Vec<MatchUpStatus>,
    /// Restrict the GEMscore to these attributes.
    #[serde(default, rename = "GEMscore")]
    pub gem_score: Option<Vec<TallyAttribute>>,
    /// Use sets played across the whole group as the setsPct denominator.
    #[serde(default)]
    pub group_total_sets_played: bool,
    /// Use games played across the whole group as the gamesPct denominator.
    #[serde(default)]
    pub group_total_games_played: bool,
    /// Decimal places kept in derived ratios.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for TallyPolicy {
    fn default() -> Self {
        Self {
            group_order_key: None,
            tally_directives: default_tally_directives(),
            head_to_head: HeadToHeadPolicy::default(),
            sets_credit_for_walkovers: false,
            sets_credit_for_defaults: false,
            sets_credit_for_retirements: false,
            games_credit_for_walkovers: false,
            games_credit_for_defaults: false,
            games_credit_for_tiebreak_sets: true,
            exclude_match_up_statuses: Vec::new(),
            gem_score: None,
            group_total_sets_played: false,
            group_total_games_played: false,
            precision: default_precision(),
        }
    }
}

impl TallyPolicy {
    /// Attribute used for the first partition of the group.
    pub fn primary_attribute(&self) -> TallyAttribute {
        self.group_order_key
            .filter(|key| key.is_group_order_key())
            .unwrap_or(TallyAttribute::MatchUpsWon)
    }

    pub fn excludes(&self, status: MatchUpStatus) -> bool {
        self.exclude_match_up_statuses.contains(&status)
    }
}

/// Policies attached to an event or structure, as far as tallying is concerned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyDefinitions {
    pub round_robin_tally: Option<TallyPolicy>,
}

impl PolicyDefinitions {
    pub fn tally_policy(&self) -> TallyPolicy {
        self.round_robin_tally.clone().unwrap_or_default()
    }
}
