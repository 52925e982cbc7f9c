//! Round robin tally: library with models and standings logic.

pub mod logic;
pub mod models;
pub mod trace;

pub use logic::{
    build_readable_report, calculate_percentages, count_games, count_points, count_sets,
    gem_score, get_group_order, get_participant_results, tally_participant_results, GroupOrder,
    GroupOrderParams, GroupTotals, ParticipantResultsOutcome, ParticipantResultsParams,
    PointsTally, TallyRequest, TallyResult,
};
pub use models::{
    default_tally_directives, Based, CollectionDefinition, FinishingPosition, HeadToHeadPolicy,
    MatchUp, MatchUpFormat, MatchUpId, MatchUpStatus, MatchUpType, ParticipantId,
    ParticipantResult, ParticipantResults, PolicyDefinitions, ReportAttribute, ReportGroup,
    ReportStep, Score, SetFormat, SetScore, Side, StepKind, StructureId, TallyAttribute,
    TallyDirective, TallyError, TallyPolicy, TieFormat, TiebreakSet,
};
pub use trace::{LogTrace, NoTrace, TraceSink};
