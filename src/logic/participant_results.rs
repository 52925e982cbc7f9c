//! Fold the matchUps of a group into per-participant results.

use crate::logic::percentages::{calculate_percentages, GroupTotals};
use crate::logic::score_counters::{count_games, count_points, count_sets};
use crate::models::{
    MatchUp, MatchUpFormat, MatchUpId, MatchUpStatus, MatchUpType, ParticipantId,
    ParticipantResult, ParticipantResults, TallyPolicy,
};

/// Inputs of one aggregation pass.
#[derive(Clone, Copy, Debug)]
pub struct ParticipantResultsParams<'a> {
    pub match_ups: &'a [MatchUp],
    /// Only count matchUps played exclusively between these participants.
    pub participant_ids: Option<&'a [ParticipantId]>,
    /// Participants that get a result even without any counted matchUp.
    pub roster: &'a [ParticipantId],
    /// Group format, used for matchUps that carry none and for expected denominators.
    pub match_up_format: &'a MatchUpFormat,
    pub tally_policy: &'a TallyPolicy,
    /// Expected matchUps per participant; 0 uses actual counts.
    pub per_player: u32,
}

/// Results of one aggregation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticipantResultsOutcome {
    pub participant_results: ParticipantResults,
    /// MatchUps skipped because a side had no participantId.
    pub malformed_match_ups: Vec<MatchUpId>,
    pub totals: GroupTotals,
}

/// Build fresh participant results from `params.match_ups`.
///
/// Every call starts from an empty map, so it can be re-run with different
/// `participant_ids` subsets without one pass leaking into another.
pub fn get_participant_results(params: &ParticipantResultsParams<'_>) -> ParticipantResultsOutcome {
    let policy = params.tally_policy;
    let group_format = params.match_up_format;

    let relevant: Vec<&MatchUp> = params
        .match_ups
        .iter()
        .filter(|m| !m.is_bye())
        .filter(|m| m.is_team() || !policy.excludes(m.match_up_status))
        .filter(|m| match params.participant_ids {
            None => true,
            Some(ids) => match m.participant_ids() {
                [Some(a), Some(b)] => ids.contains(a) && ids.contains(b),
                _ => false,
            },
        })
        .collect();

    let mut participant_results = ParticipantResults::new();
    for id in params.roster {
        participant_results.entry(id);
    }

    let totals = relevant
        .iter()
        .fold(GroupTotals::default(), |mut totals, match_up| {
            let (sets, games) = match_up_totals(match_up, group_format, policy);
            totals.sets = totals.sets.saturating_add(sets);
            totals.games = totals.games.saturating_add(games);
            totals
        });

    let mut malformed_match_ups = Vec::new();
    for match_up in relevant {
        let [Some(side1), Some(side2)] = match_up.participant_ids() else {
            log::warn!(
                "matchUp {} skipped: a side has no participantId",
                match_up.match_up_id
            );
            malformed_match_ups.push(match_up.match_up_id.clone());
            continue;
        };
        let ids = [side1, side2];
        let format = match_up.match_up_format.as_ref().unwrap_or(group_format);

        match match_up.winner_index() {
            Some(winner) => tally_decided(&mut participant_results, match_up, ids, winner, format, policy),
            None => tally_undecided(&mut participant_results, match_up, ids, format, policy),
        }
    }

    calculate_percentages(
        &mut participant_results,
        group_format,
        policy,
        params.per_player,
        totals,
    );

    log::debug!(
        "tallied {} participants ({} sets, {} games in group)",
        participant_results.len(),
        totals.sets,
        totals.games
    );

    ParticipantResultsOutcome {
        participant_results,
        malformed_match_ups,
        totals,
    }
}

/// Apply `[side1, side2]` tallies to both participants as won/lost.
fn credit(
    results: &mut ParticipantResults,
    ids: [&ParticipantId; 2],
    tally: [u32; 2],
    apply: impl Fn(&mut ParticipantResult, u32, u32),
) {
    apply(results.entry(ids[0]), tally[0], tally[1]);
    apply(results.entry(ids[1]), tally[1], tally[0]);
}

fn tally_scores(
    results: &mut ParticipantResults,
    ids: [&ParticipantId; 2],
    match_up: &MatchUp,
    format: &MatchUpFormat,
    policy: &TallyPolicy,
    with_games: bool,
) {
    let winning_side = match_up.winning_side;
    let status = match_up.match_up_status;
    let score = match_up.score.as_ref();

    let sets = count_sets(winning_side, format, status, policy, score);
    credit(results, ids, sets, ParticipantResult::add_sets);

    if with_games {
        let games = count_games(winning_side, format, status, policy, score);
        credit(results, ids, games, ParticipantResult::add_games);
    }

    let points = count_points(format, score);
    credit(results, ids, points.points_tally, ParticipantResult::add_points);
    credit(results, ids, points.tiebreaks_tally, ParticipantResult::add_tiebreaks);
}

/// MatchUp with a winner: win/loss, victories/defeats, forfeits, then scores.
fn tally_decided(
    results: &mut ParticipantResults,
    match_up: &MatchUp,
    ids: [&ParticipantId; 2],
    winner: usize,
    format: &MatchUpFormat,
    policy: &TallyPolicy,
) {
    let (winner_id, loser_id) = (ids[winner], ids[1 - winner]);

    let won = results.entry(winner_id);
    won.match_ups_won += 1;
    won.victories.push(loser_id.clone());

    let lost = results.entry(loser_id);
    lost.match_ups_lost += 1;
    lost.defeats.push(winner_id.clone());
    match match_up.match_up_status {
        MatchUpStatus::Walkover => {
            lost.walkovers += 1;
            lost.all_defaults += 1;
        }
        MatchUpStatus::Defaulted => {
            lost.defaults += 1;
            lost.all_defaults += 1;
        }
        MatchUpStatus::Retired => lost.retirements += 1,
        _ => {}
    }

    if match_up.is_team() {
        tally_ties(results, match_up, ids, format, policy);
    } else {
        tally_scores(results, ids, match_up, format, policy, true);
    }
}

/// MatchUp without a winner: cancellations, team rubbers in progress, or bare scores.
fn tally_undecided(
    results: &mut ParticipantResults,
    match_up: &MatchUp,
    ids: [&ParticipantId; 2],
    format: &MatchUpFormat,
    policy: &TallyPolicy,
) {
    let status = match_up.match_up_status;
    if status.is_cancelled() {
        for id in ids {
            let result = results.entry(id);
            result.match_ups_cancelled += 1;
            match status {
                MatchUpStatus::DoubleWalkover => {
                    result.walkovers += 1;
                    result.all_defaults += 1;
                }
                MatchUpStatus::DoubleDefault => {
                    result.defaults += 1;
                    result.all_defaults += 1;
                }
                _ => {}
            }
        }
        return;
    }

    results.entry(ids[0]);
    results.entry(ids[1]);
    if match_up.is_team() {
        tally_ties(results, match_up, ids, format, policy);
    } else {
        tally_scores(results, ids, match_up, format, policy, true);
    }
}

/// Walk the rubbers of a TEAM matchUp, crediting each to the team on the same side.
fn tally_ties(
    results: &mut ParticipantResults,
    match_up: &MatchUp,
    ids: [&ParticipantId; 2],
    format: &MatchUpFormat,
    policy: &TallyPolicy,
) {
    let manual_games = match_up.manual_games_override();

    for tie in &match_up.tie_match_ups {
        if policy.excludes(tie.match_up_status) {
            continue;
        }
        let tie_format = tie.match_up_format.as_ref().unwrap_or(format);

        if let Some(winner) = tie.winner_index() {
            let won = results.entry(ids[winner]);
            won.tie_match_ups_won += 1;
            match tie.match_up_type {
                MatchUpType::Singles => won.tie_singles_won += 1,
                MatchUpType::Doubles => won.tie_doubles_won += 1,
                MatchUpType::Team => {}
            }
            let lost = results.entry(ids[1 - winner]);
            lost.tie_match_ups_lost += 1;
            match tie.match_up_type {
                MatchUpType::Singles => lost.tie_singles_lost += 1,
                MatchUpType::Doubles => lost.tie_doubles_lost += 1,
                MatchUpType::Team => {}
            }
        }

        tally_scores(results, ids, tie, tie_format, policy, !manual_games);
    }

    if manual_games {
        let games = match_up.sets().iter().fold([0u32, 0u32], |acc, set| {
            let [side1, side2] = set.scores();
            [acc[0].saturating_add(side1), acc[1].saturating_add(side2)]
        });
        credit(results, ids, games, ParticipantResult::add_games);
    }
}

/// Sets and games a matchUp contributes to the group totals.
fn match_up_totals(match_up: &MatchUp, group_format: &MatchUpFormat, policy: &TallyPolicy) -> (u32, u32) {
    let format = match_up.match_up_format.as_ref().unwrap_or(group_format);
    if match_up.is_team() {
        return match_up
            .tie_match_ups
            .iter()
            .filter(|tie| !policy.excludes(tie.match_up_status))
            .map(|tie| match_up_totals(tie, format, policy))
            .fold((0u32, 0u32), |acc, (sets, games)| {
                (acc.0.saturating_add(sets), acc.1.saturating_add(games))
            });
    }
    let status = match_up.match_up_status;
    let score = match_up.score.as_ref();
    let sets = count_sets(match_up.winning_side, format, status, policy, score);
    let games = count_games(match_up.winning_side, format, status, policy, score);
    (sets[0].saturating_add(sets[1]), games[0].saturating_add(games[1]))
}
