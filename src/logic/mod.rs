//! Tally logic: score counting, aggregation, ratios, group order, reports.

mod group_order;
mod participant_results;
mod percentages;
mod report;
mod score_counters;
mod tally;

pub use group_order::{gem_score, get_group_order, GroupOrder, GroupOrderParams};
pub use participant_results::{
    get_participant_results, ParticipantResultsOutcome, ParticipantResultsParams,
};
pub use percentages::{calculate_percentages, GroupTotals};
pub use report::build_readable_report;
pub use score_counters::{count_games, count_points, count_sets, PointsTally};
pub use tally::{tally_participant_results, TallyRequest, TallyResult};
