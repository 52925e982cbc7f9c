//! Tally a round robin group: validate, aggregate, order, merge, report.

use crate::logic::group_order::{get_group_order, GroupOrder, GroupOrderParams};
use crate::logic::participant_results::{get_participant_results, ParticipantResultsParams};
use crate::logic::report::build_readable_report;
use crate::models::{
    FinishingPosition, MatchUp, MatchUpFormat, MatchUpId, ParticipantId, ParticipantResults,
    PolicyDefinitions, ReportStep, TallyError,
};
use crate::trace::TraceSink;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Everything needed to tally one group.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TallyRequest {
    pub policy_definitions: PolicyDefinitions,
    pub match_ups: Vec<MatchUp>,
    /// Group format; defaults to the first matchUp's format, then best of 3 sets to 6.
    pub match_up_format: Option<MatchUpFormat>,
    pub sub_order_map: Option<HashMap<ParticipantId, u32>>,
    /// Expected matchUps per participant, used for expected-count denominators.
    pub per_player: u32,
    pub generate_report: bool,
}

/// Standings of one group.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResult {
    pub participant_results: ParticipantResults,
    /// Empty until the group (or every team tie) is complete.
    pub order: Vec<FinishingPosition>,
    pub bracket_complete: bool,
    pub completed_tie_match_ups: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_report: Option<String>,
    pub report: Vec<ReportStep>,
    /// MatchUps skipped because a side had no participantId.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub malformed_match_ups: Vec<MatchUpId>,
}

/// Ranking annotations of one participant, taken from a resolved order.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RankingSnapshot {
    group_order: u32,
    rank_order: u32,
    sub_order: Option<u32>,
    ties: Option<u32>,
    gem_score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Ranking {
    Final(RankingSnapshot),
    Provisional(u32),
}

/// Collects rankings and applies them to the participant results in one pass.
struct StandingsBuilder {
    participant_results: ParticipantResults,
    rankings: HashMap<ParticipantId, Ranking>,
}

impl StandingsBuilder {
    fn new(participant_results: ParticipantResults) -> Self {
        Self {
            participant_results,
            rankings: HashMap::new(),
        }
    }

    fn with_final_order(mut self, order: &[FinishingPosition]) -> Self {
        for position in order {
            let snapshot = RankingSnapshot {
                group_order: position.group_order,
                rank_order: position.rank_order,
                sub_order: position.sub_order,
                ties: position.ties,
                gem_score: position.gem_score,
            };
            self.rankings
                .insert(position.participant_id.clone(), Ranking::Final(snapshot));
        }
        self
    }

    fn with_provisional_order(mut self, order: &[FinishingPosition]) -> Self {
        for position in order {
            self.rankings.insert(
                position.participant_id.clone(),
                Ranking::Provisional(position.group_order),
            );
        }
        self
    }

    fn build(mut self) -> ParticipantResults {
        for (id, ranking) in self.rankings {
            let Some(result) = self.participant_results.get_mut(&id) else {
                continue;
            };
            match ranking {
                Ranking::Final(snapshot) => {
                    result.group_order = Some(snapshot.group_order);
                    result.rank_order = Some(snapshot.rank_order);
                    result.sub_order = snapshot.sub_order;
                    result.ties = snapshot.ties;
                    result.gem_score = Some(snapshot.gem_score);
                }
                Ranking::Provisional(order) => result.provisional_order = Some(order),
            }
        }
        self.participant_results
    }
}

fn validate(match_ups: &[MatchUp]) -> Result<(), TallyError> {
    if match_ups.is_empty() {
        return Err(TallyError::MissingMatchUps);
    }
    let structure_ids: BTreeSet<&str> = match_ups
        .iter()
        .map(|m| m.structure_id.as_str())
        .collect();
    if structure_ids.len() != 1 {
        return Err(TallyError::InvalidValues(format!(
            "matchUps must share one structureId, found {}",
            structure_ids.len()
        )));
    }
    Ok(())
}

/// Participant ids of all sides, in order of first appearance.
fn roster(match_ups: &[&MatchUp]) -> Vec<ParticipantId> {
    let mut roster: Vec<ParticipantId> = Vec::new();
    for id in match_ups.iter().flat_map(|m| m.participant_ids()).flatten() {
        if !roster.contains(id) {
            roster.push(id.clone());
        }
    }
    roster
}

/// Tally results and resolve the finishing order of one round robin group.
///
/// The final order is only merged once every matchUp has finished; until then each
/// participant carries a `provisionalOrder` and the top-level `order` stays empty (unless
/// every team tie is complete).
pub fn tally_participant_results(
    request: &TallyRequest,
    trace: &mut dyn TraceSink,
) -> Result<TallyResult, TallyError> {
    let match_ups = &request.match_ups;
    validate(match_ups)?;

    let playable: Vec<&MatchUp> = match_ups.iter().filter(|m| !m.is_bye()).collect();
    let roster = roster(&playable);

    let draw_positions: HashSet<u32> = playable
        .iter()
        .flat_map(|m| m.draw_positions.iter().copied())
        .collect();
    let participants_count = if draw_positions.is_empty() {
        roster.len()
    } else {
        draw_positions.len()
    };

    let bracket_complete = playable.iter().all(|m| m.match_up_status.is_complete());
    let per_player = if bracket_complete { request.per_player } else { 0 };
    let completed_tie_match_ups = match_ups.iter().all(|m| {
        m.is_team()
            && m
                .tie_match_ups
                .iter()
                .all(|tie| tie.match_up_status.is_complete())
    });
    trace.trace(
        "validate",
        &format!(
            "{} participants, {} matchUps, bracket complete: {}",
            participants_count,
            playable.len(),
            bracket_complete
        ),
    );

    let format = request
        .match_up_format
        .or_else(|| match_ups.iter().find_map(|m| m.match_up_format))
        .unwrap_or_default();
    let policy = request.policy_definitions.tally_policy();

    let tallied: Vec<MatchUp> = playable
        .iter()
        .filter(|m| m.match_up_status.is_complete() || m.is_team())
        .map(|m| (*m).clone())
        .collect();

    let outcome = get_participant_results(&ParticipantResultsParams {
        match_ups: &tallied,
        participant_ids: None,
        roster: &roster,
        match_up_format: &format,
        tally_policy: &policy,
        per_player,
    });
    trace.trace(
        "aggregate",
        &format!(
            "{} matchUps tallied, {} malformed",
            tallied.len(),
            outcome.malformed_match_ups.len()
        ),
    );

    let mut order_params = GroupOrderParams {
        participant_results: &outcome.participant_results,
        participants_count,
        match_ups: &tallied,
        match_up_format: &format,
        tally_policy: &policy,
        sub_order_map: request.sub_order_map.as_ref(),
        require_completion: true,
    };

    let final_order = get_group_order(&order_params).filter(|_| bracket_complete);
    let builder = StandingsBuilder::new(outcome.participant_results.clone());
    let (builder, GroupOrder { order, report }) = match final_order {
        Some(group_order) => {
            trace.trace("order", "final order resolved");
            (builder.with_final_order(&group_order.order), group_order)
        }
        None => {
            order_params.require_completion = false;
            let provisional = get_group_order(&order_params).unwrap_or_default();
            trace.trace("order", "provisional order resolved");
            (builder.with_provisional_order(&provisional.order), provisional)
        }
    };
    for step in &report {
        trace.trace(
            "report",
            &match step.attribute {
                Some(attribute) => format!(
                    "{:?} {} participants by {}",
                    step.kind,
                    step.participant_ids.len(),
                    attribute.name()
                ),
                None => format!("{:?} {} participants", step.kind, step.participant_ids.len()),
            },
        );
    }

    let readable_report = request
        .generate_report
        .then(|| build_readable_report(match_ups, &report, &order));

    let order = if bracket_complete || completed_tie_match_ups {
        order
    } else {
        Vec::new()
    };

    Ok(TallyResult {
        participant_results: builder.build(),
        order,
        bracket_complete,
        completed_tie_match_ups,
        readable_report,
        report,
        malformed_match_ups: outcome.malformed_match_ups,
    })
}
