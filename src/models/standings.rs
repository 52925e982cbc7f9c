//! FinishingPosition and the audit trail of tie-break decisions.

use crate::models::match_up::ParticipantId;
use crate::models::policy::{TallyAttribute, TallyDirective};
use serde::{Serialize, Serializer};

/// Place of one participant in the group order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishingPosition {
    pub participant_id: ParticipantId,
    /// False when the cascade could not separate this participant from others.
    pub resolved: bool,
    pub position: u32,
    /// Path of partition indices leading to an unresolved cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<Vec<usize>>,
    /// Fully disambiguated rank: position + (subOrder or 1) - 1.
    pub group_order: u32,
    /// Shared rank; equals `position`.
    pub rank_order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_order: Option<u32>,
    /// Number of participants sharing this position, when more than one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ties: Option<u32>,
    #[serde(rename = "GEMscore")]
    pub gem_score: f64,
}

/// Whether a step formed the initial groups, split a tie, or gave up on one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Grouped,
    Separated,
    Unresolved,
}

/// What a report step partitioned by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportAttribute {
    Tally(TallyAttribute),
    HeadToHead,
}

impl ReportAttribute {
    pub fn name(self) -> &'static str {
        match self {
            ReportAttribute::Tally(attribute) => attribute.name(),
            ReportAttribute::HeadToHead => "headToHead",
        }
    }
}

impl Serialize for ReportAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Participants sharing one value of the step's attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGroup {
    pub value: f64,
    pub participant_ids: Vec<ParticipantId>,
}

/// One grouping or separation decision.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStep {
    pub kind: StepKind,
    /// None for unresolved steps: nothing separated the participants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<ReportAttribute>,
    pub reversed: bool,
    pub ids_filter: bool,
    pub participant_ids: Vec<ParticipantId>,
    /// Ordered best first.
    pub groups: Vec<ReportGroup>,
    /// Directives skipped because too many participants were tied.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_directives: Vec<TallyDirective>,
}
