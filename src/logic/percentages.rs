//! Ratios derived from participant accumulators.

use crate::models::{MatchUpFormat, ParticipantResult, ParticipantResults, TallyPolicy};

/// Sets and games played across the whole group (both sides counted).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GroupTotals {
    pub sets: u32,
    pub games: u32,
}

/// Largest number of decimal places kept; beyond this f64 rounding is meaningless.
const MAX_PRECISION: u32 = 15;

/// Rounds `numerator / denominator` to the policy precision; None when not finite.
fn ratio(numerator: u32, denominator: u32, factor: f64) -> Option<f64> {
    let value = f64::from(numerator) / f64::from(denominator);
    let rounded = (value * factor).round() / factor;
    rounded.is_finite().then_some(rounded)
}

fn diff(won: u32, lost: u32) -> i32 {
    let diff = i64::from(won) - i64::from(lost);
    i32::try_from(diff).unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX })
}

/// Fill the derived fields of every participant.
///
/// A zero denominator never yields NaN or Infinity: `matchUpsPct` and `tieMatchUpsPct` fall
/// back to the win count, `setsPct` to the sets denominator, `gamesPct` and `pointsPct` to 0.
/// `per_player` (expected matchUps per participant) switches sets and games to expected
/// denominators; pass 0 while the group is still being played.
pub fn calculate_percentages(
    participant_results: &mut ParticipantResults,
    format: &MatchUpFormat,
    policy: &TallyPolicy,
    per_player: u32,
    totals: GroupTotals,
) {
    let precision = policy.precision.min(MAX_PRECISION);
    let factor = 10f64.powi(i32::try_from(precision).unwrap_or(3));
    let bracket_sets_to_win = format.sets_to_win();
    let expected_sets = per_player.saturating_mul(bracket_sets_to_win);
    let minimum_expected_games = expected_sets.saturating_mul(format.set_format.games_for_set());

    for result in participant_results.values_mut() {
        derive(
            result,
            factor,
            policy,
            expected_sets,
            minimum_expected_games,
            totals,
        );
    }
}

fn derive(
    result: &mut ParticipantResult,
    factor: f64,
    policy: &TallyPolicy,
    expected_sets: u32,
    minimum_expected_games: u32,
    totals: GroupTotals,
) {
    result.match_ups_pct = ratio(
        result.match_ups_won,
        result.match_ups_won.saturating_add(result.match_ups_lost),
        factor,
    )
    .unwrap_or_else(|| f64::from(result.match_ups_won));

    result.tie_match_ups_pct = ratio(
        result.tie_match_ups_won,
        result.tie_match_ups_won.saturating_add(result.tie_match_ups_lost),
        factor,
    )
    .unwrap_or_else(|| f64::from(result.tie_match_ups_won));

    let sets_total = if policy.group_total_sets_played {
        totals.sets
    } else if expected_sets > 0 {
        expected_sets
    } else {
        result.sets_won.saturating_add(result.sets_lost)
    };
    result.sets_pct =
        ratio(result.sets_won, sets_total, factor).unwrap_or_else(|| f64::from(sets_total));

    let games_total = if policy.group_total_games_played {
        totals.games
    } else {
        minimum_expected_games.max(result.games_won.saturating_add(result.games_lost))
    };
    result.games_pct = ratio(result.games_won, games_total, factor).unwrap_or(0.0);

    result.points_pct = ratio(
        result.points_won,
        result.points_won.saturating_add(result.points_lost),
        factor,
    )
    .unwrap_or(0.0);

    result.sets_diff = diff(result.sets_won, result.sets_lost);
    result.games_diff = diff(result.games_won, result.games_lost);
    result.points_diff = diff(result.points_won, result.points_lost);
    result.result = format!("{}/{}", result.match_ups_won, result.match_ups_lost);
    result.games = format!("{}/{}", result.games_won, result.games_lost);
}
