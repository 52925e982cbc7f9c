//! Integration tests for per-matchUp set, game and point counting.

mod common;

use common::{match_tiebreak, score, set, tiebreak_set, unfinished_set};
use round_robin_tally::{
    count_games, count_points, count_sets, Based, MatchUpFormat, MatchUpStatus, SetFormat,
    TallyPolicy, TiebreakSet,
};

fn best_of_three() -> MatchUpFormat {
    MatchUpFormat::default()
}

fn with_match_tiebreak() -> MatchUpFormat {
    MatchUpFormat {
        final_set_format: Some(SetFormat {
            set_to: None,
            tiebreak_at: None,
            based: Based::Games,
            tiebreak_set: Some(TiebreakSet { tiebreak_to: 10 }),
        }),
        ..MatchUpFormat::default()
    }
}

fn rally_points() -> MatchUpFormat {
    MatchUpFormat {
        best_of: 3,
        set_format: SetFormat {
            set_to: Some(21),
            tiebreak_at: None,
            based: Based::Points,
            tiebreak_set: None,
        },
        final_set_format: None,
    }
}

#[test]
fn sets_are_counted_from_set_winners() {
    let s = score(vec![set(6, 3), set(6, 4)]);
    let policy = TallyPolicy::default();
    assert_eq!(
        count_sets(Some(1), &best_of_three(), MatchUpStatus::Completed, &policy, s.as_ref()),
        [2, 0]
    );
}

#[test]
fn walkover_credits_sets_to_win_only_when_policy_allows() {
    let format = best_of_three();
    let credit = TallyPolicy {
        sets_credit_for_walkovers: true,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_sets(Some(1), &format, MatchUpStatus::Walkover, &credit, None),
        [2, 0]
    );
    assert_eq!(
        count_sets(Some(2), &format, MatchUpStatus::Walkover, &credit, None),
        [0, 2]
    );
    assert_eq!(
        count_sets(Some(1), &format, MatchUpStatus::Walkover, &TallyPolicy::default(), None),
        [0, 0]
    );
}

#[test]
fn default_credit_uses_best_of_five() {
    let format = MatchUpFormat {
        best_of: 5,
        ..MatchUpFormat::default()
    };
    let policy = TallyPolicy {
        sets_credit_for_defaults: true,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_sets(Some(2), &format, MatchUpStatus::Defaulted, &policy, None),
        [0, 3]
    );
}

#[test]
fn retirement_counts_finished_sets_and_optionally_credits_the_winner() {
    let s = score(vec![set(6, 3), unfinished_set(2, 1)]);
    let format = best_of_three();
    assert_eq!(
        count_sets(Some(1), &format, MatchUpStatus::Retired, &TallyPolicy::default(), s.as_ref()),
        [1, 0]
    );
    let credit = TallyPolicy {
        sets_credit_for_retirements: true,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_sets(Some(1), &format, MatchUpStatus::Retired, &credit, s.as_ref()),
        [2, 0]
    );
}

#[test]
fn retirement_drops_unfinished_trailing_set_marked_for_the_loser() {
    // 2-3 in the second set is not a finished set even if recorded as won by side 2
    let s = score(vec![set(6, 3), set(2, 3)]);
    assert_eq!(
        count_sets(
            Some(1),
            &best_of_three(),
            MatchUpStatus::Retired,
            &TallyPolicy::default(),
            s.as_ref()
        ),
        [1, 0]
    );
}

#[test]
fn games_sum_games_based_sets() {
    let s = score(vec![set(6, 3), set(6, 4)]);
    assert_eq!(
        count_games(
            Some(1),
            &best_of_three(),
            MatchUpStatus::Completed,
            &TallyPolicy::default(),
            s.as_ref()
        ),
        [12, 7]
    );
}

#[test]
fn match_tiebreak_is_worth_one_game_unless_disabled() {
    let s = score(vec![set(6, 4), set(4, 6), match_tiebreak(10, 8)]);
    let format = with_match_tiebreak();
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Completed, &TallyPolicy::default(), s.as_ref()),
        [11, 10]
    );
    let no_credit = TallyPolicy {
        games_credit_for_tiebreak_sets: false,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Completed, &no_credit, s.as_ref()),
        [10, 10]
    );
}

#[test]
fn retirement_completes_the_last_set_for_the_winner() {
    let format = best_of_three();
    let policy = TallyPolicy::default();

    let trailing = score(vec![set(6, 3), unfinished_set(3, 4)]);
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Retired, &policy, trailing.as_ref()),
        [12, 7]
    );

    // loser at 5 games: winner needs 7
    let close = score(vec![set(6, 3), unfinished_set(4, 5)]);
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Retired, &policy, close.as_ref()),
        [13, 8]
    );
}

#[test]
fn retirement_pads_missing_sets_to_the_winner() {
    let format = best_of_three();
    let policy = TallyPolicy::default();

    let early = score(vec![unfinished_set(2, 1)]);
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Retired, &policy, early.as_ref()),
        [12, 1]
    );
    assert_eq!(
        count_games(Some(2), &format, MatchUpStatus::Retired, &policy, None),
        [0, 12]
    );
}

#[test]
fn walkover_games_credit() {
    let policy = TallyPolicy {
        games_credit_for_walkovers: true,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_games(Some(1), &best_of_three(), MatchUpStatus::Walkover, &policy, None),
        [12, 0]
    );
}

#[test]
fn points_based_sets_count_points_not_games() {
    let s = score(vec![set(21, 15), set(18, 21), set(21, 19)]);
    let format = rally_points();
    let tally = count_points(&format, s.as_ref());
    assert_eq!(tally.points_tally, [60, 55]);
    assert_eq!(tally.tiebreaks_tally, [0, 0]);
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Completed, &TallyPolicy::default(), s.as_ref()),
        [0, 0]
    );
}

#[test]
fn tiebreak_points_and_tiebreaks_won() {
    let s = score(vec![tiebreak_set(7, 6, 7, 5), set(6, 4)]);
    let tally = count_points(&best_of_three(), s.as_ref());
    assert_eq!(tally.points_tally, [7, 5]);
    assert_eq!(tally.tiebreaks_tally, [1, 0]);

    let s = score(vec![set(6, 4), set(4, 6), match_tiebreak(10, 8)]);
    let tally = count_points(&with_match_tiebreak(), s.as_ref());
    assert_eq!(tally.points_tally, [10, 8]);
    assert_eq!(tally.tiebreaks_tally, [1, 0]);
}

#[test]
fn absent_score_counts_nothing() {
    let format = best_of_three();
    let policy = TallyPolicy::default();
    assert_eq!(
        count_sets(None, &format, MatchUpStatus::Completed, &policy, None),
        [0, 0]
    );
    assert_eq!(
        count_games(None, &format, MatchUpStatus::Completed, &policy, None),
        [0, 0]
    );
    let tally = count_points(&format, None);
    assert_eq!(tally.points_tally, [0, 0]);
    assert_eq!(tally.tiebreaks_tally, [0, 0]);
}

#[test]
fn retirement_before_the_match_tiebreak_pads_one_game() {
    let s = score(vec![set(6, 4), set(4, 6)]);
    assert_eq!(
        count_games(
            Some(1),
            &with_match_tiebreak(),
            MatchUpStatus::Retired,
            &TallyPolicy::default(),
            s.as_ref()
        ),
        [11, 10]
    );
}

#[test]
fn huge_best_of_pads_without_overflow() {
    let format = MatchUpFormat {
        best_of: u32::MAX,
        ..MatchUpFormat::default()
    };
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Retired, &TallyPolicy::default(), None),
        [u32::MAX, 0]
    );
}

#[test]
fn huge_set_length_saturates_games() {
    let format = MatchUpFormat {
        set_format: SetFormat {
            set_to: Some(u32::MAX),
            tiebreak_at: Some(u32::MAX),
            ..SetFormat::default()
        },
        ..MatchUpFormat::default()
    };
    let policy = TallyPolicy {
        games_credit_for_walkovers: true,
        ..TallyPolicy::default()
    };
    assert_eq!(
        count_games(Some(2), &format, MatchUpStatus::Walkover, &policy, None),
        [0, u32::MAX]
    );

    let s = score(vec![set(6, 3), unfinished_set(3, 4)]);
    assert_eq!(
        count_games(Some(1), &format, MatchUpStatus::Retired, &policy, s.as_ref()),
        [u32::MAX, 7]
    );
}
