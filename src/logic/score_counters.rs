//! Per-matchUp tallies of sets, games and points.
//!
//! Pure functions over one score: they never fail and an absent score counts as nothing.

use crate::models::{side_index, MatchUpFormat, MatchUpStatus, Score, SetFormat, SetScore, TallyPolicy};

/// Points and tiebreaks won by each side of one matchUp.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PointsTally {
    pub points_tally: [u32; 2],
    pub tiebreaks_tally: [u32; 2],
}

fn sets_of(score: Option<&Score>) -> &[SetScore] {
    score.map(|s| s.sets.as_slice()).unwrap_or(&[])
}

/// Position of the set within the matchUp: its own number, else its index.
fn set_number(set: &SetScore, index: usize) -> u32 {
    set.set_number
        .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX))
}

/// Walkover or default that the policy credits as a full win.
fn credited_forfeit(status: MatchUpStatus, for_walkovers: bool, for_defaults: bool) -> bool {
    match status {
        MatchUpStatus::Walkover => for_walkovers,
        MatchUpStatus::Defaulted => for_defaults,
        _ => false,
    }
}

/// Sets won by `[side1, side2]`.
///
/// Credited walkovers/defaults hand the winner `setsToWin` sets. A retirement drops an
/// unfinished trailing set the loser was leading, and with `setsCreditForRetirements`
/// the winner is credited the full `setsToWin`.
pub fn count_sets(
    winning_side: Option<u8>,
    format: &MatchUpFormat,
    status: MatchUpStatus,
    policy: &TallyPolicy,
    score: Option<&Score>,
) -> [u32; 2] {
    let mut tally = [0, 0];
    let winner = side_index(winning_side);
    let sets_to_win = format.sets_to_win();

    if let Some(w) = winner {
        if credited_forfeit(
            status,
            policy.sets_credit_for_walkovers,
            policy.sets_credit_for_defaults,
        ) {
            tally[w] = sets_to_win;
            return tally;
        }
    }

    let sets = sets_of(score);
    for set in sets {
        if let Some(i) = set.winner_index() {
            tally[i] += 1;
        }
    }

    if let (MatchUpStatus::Retired, Some(w)) = (status, winner) {
        let loser = 1 - w;
        if let Some(last) = sets.last() {
            let set_format = format.set_format_for(set_number(last, sets.len() - 1));
            if last.winner_index() == Some(loser) && set_format.is_unfinished(last.scores()) {
                tally[loser] = tally[loser].saturating_sub(1);
            }
        }
        if tally[loser] >= sets_to_win {
            tally[loser] = sets_to_win - 1;
        }
        if policy.sets_credit_for_retirements {
            tally[w] = sets_to_win;
        }
    }

    tally
}

/// Games a padded (never played) set is worth to the winner.
fn padded_set_games(set_format: &SetFormat, policy: &TallyPolicy) -> u32 {
    if set_format.is_tiebreak_set() {
        u32::from(policy.games_credit_for_tiebreak_sets)
    } else {
        set_format.games_for_set()
    }
}

/// Games won by `[side1, side2]`.
///
/// Only games-based sets contribute their scores; a won tiebreak-only set is worth one game
/// unless `gamesCreditForTiebreakSets` is off. For a retirement the unfinished last set is
/// completed for the winner and missing sets are padded until the winner reaches `setsToWin`.
pub fn count_games(
    winning_side: Option<u8>,
    format: &MatchUpFormat,
    status: MatchUpStatus,
    policy: &TallyPolicy,
    score: Option<&Score>,
) -> [u32; 2] {
    let mut tally = [0, 0];
    let winner = side_index(winning_side);
    let sets_to_win = format.sets_to_win();

    if let Some(w) = winner {
        if credited_forfeit(
            status,
            policy.games_credit_for_walkovers,
            policy.games_credit_for_defaults,
        ) {
            tally[w] = sets_to_win.saturating_mul(format.set_format.games_for_set());
            return tally;
        }
    }

    let sets = sets_of(score);
    for (index, set) in sets.iter().enumerate() {
        let set_format = format.set_format_for(set_number(set, index));
        if set_format.is_points_based() {
            continue;
        }
        if set_format.is_tiebreak_set() {
            if policy.games_credit_for_tiebreak_sets {
                if let Some(i) = set.winner_index() {
                    tally[i] += 1;
                }
            }
            continue;
        }
        let [side1, side2] = set.scores();
        tally[0] = tally[0].saturating_add(side1);
        tally[1] = tally[1].saturating_add(side2);
    }

    let (MatchUpStatus::Retired, Some(w)) = (status, winner) else {
        return tally;
    };
    let loser = 1 - w;
    let mut winner_sets = sets.iter().filter(|s| s.winner_index() == Some(w)).count();

    if let Some(last) = sets.last() {
        let set_format = format.set_format_for(set_number(last, sets.len() - 1));
        let games_based = !set_format.is_points_based() && !set_format.is_tiebreak_set();
        let scores = last.scores();
        if games_based && (last.winner_index().is_none() || set_format.is_unfinished(scores)) {
            let needed = set_format.complement(scores[loser]);
            tally[w] = tally[w].saturating_add(needed.saturating_sub(scores[w]));
            if last.winner_index() != Some(w) {
                winner_sets += 1;
            }
        }
    }

    let winner_sets = u32::try_from(winner_sets).unwrap_or(u32::MAX);
    let missing = sets_to_win.saturating_sub(winner_sets);
    let padding = padded_games(format, policy, sets.len(), missing);
    tally[w] = tally[w].saturating_add(padding);

    tally
}

/// Games for `missing` padded sets numbered after the `played` ones.
fn padded_games(format: &MatchUpFormat, policy: &TallyPolicy, played: usize, missing: u32) -> u32 {
    if missing == 0 {
        return 0;
    }
    let regular = padded_set_games(&format.set_format, policy);
    let first = u64::try_from(played).unwrap_or(u64::MAX).saturating_add(1);
    let last = first.saturating_add(u64::from(missing) - 1);
    let final_set = u64::from(format.best_of);
    if (first..=last).contains(&final_set) {
        let final_games = padded_set_games(format.set_format_for(format.best_of), policy);
        regular
            .saturating_mul(missing - 1)
            .saturating_add(final_games)
    } else {
        regular.saturating_mul(missing)
    }
}

/// Points and tiebreaks won by each side.
///
/// Points-based sets contribute their raw scores; other sets contribute tiebreak points, and
/// a set decided by a tiebreak counts as a tiebreak won.
pub fn count_points(format: &MatchUpFormat, score: Option<&Score>) -> PointsTally {
    let mut tally = PointsTally::default();

    for (index, set) in sets_of(score).iter().enumerate() {
        let set_format = format.set_format_for(set_number(set, index));
        if set_format.is_points_based() {
            let [side1, side2] = set.scores();
            tally.points_tally[0] = tally.points_tally[0].saturating_add(side1);
            tally.points_tally[1] = tally.points_tally[1].saturating_add(side2);
            continue;
        }

        // tiebreak-only sets are sometimes recorded in the side scores
        let points = if set_format.is_tiebreak_set() && !set.has_tiebreak() {
            set.scores()
        } else {
            set.tiebreak_scores()
        };
        tally.points_tally[0] = tally.points_tally[0].saturating_add(points[0]);
        tally.points_tally[1] = tally.points_tally[1].saturating_add(points[1]);

        if set_format.is_tiebreak_set() || set.has_tiebreak() {
            if let Some(i) = set.winner_index() {
                tally.tiebreaks_tally[i] += 1;
            }
        }
    }

    tally
}
