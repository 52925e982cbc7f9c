//! Data structures for round robin tallies: matchUps, formats, policies, results, standings.

mod error;
mod format;
mod match_up;
mod participant_result;
mod policy;
mod standings;

pub use error::TallyError;
pub use format::{Based, MatchUpFormat, SetFormat, TiebreakSet};
pub(crate) use match_up::side_index;
pub use match_up::{
    CollectionDefinition, MatchUp, MatchUpId, MatchUpStatus, MatchUpType, ParticipantId, Score,
    SetScore, Side, StructureId, TieFormat,
};
pub use participant_result::{ParticipantResult, ParticipantResults};
pub use policy::{
    default_tally_directives, HeadToHeadPolicy, PolicyDefinitions, TallyAttribute, TallyDirective,
    TallyPolicy,
};
pub use standings::{FinishingPosition, ReportAttribute, ReportGroup, ReportStep, StepKind};
