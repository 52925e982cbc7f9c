//! Property tests over randomly played groups.

mod common;

use common::{decided, pending, request, set, unfinished_set, win};
use proptest::prelude::*;
use round_robin_tally::{
    default_tally_directives, tally_participant_results, MatchUp, MatchUpStatus, NoTrace,
    PolicyDefinitions, TallyPolicy, TallyResult,
};

const PLAYERS: [&str; 5] = ["p1", "p2", "p3", "p4", "p5"];

#[derive(Clone, Copy, Debug)]
enum Outcome {
    Side1,
    Side2,
    Pending,
    Walkover,
    Retired,
    Abandoned,
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        4 => Just(Outcome::Side1),
        4 => Just(Outcome::Side2),
        1 => Just(Outcome::Pending),
        1 => Just(Outcome::Walkover),
        1 => Just(Outcome::Retired),
        1 => Just(Outcome::Abandoned),
    ]
}

fn arb_group() -> impl Strategy<Value = (usize, Vec<Outcome>)> {
    (2usize..=5, prop::collection::vec(arb_outcome(), 10))
}

/// Strength ranks of 2..=5 players: rank 0 beats everyone.
fn arb_ranking() -> impl Strategy<Value = Vec<usize>> {
    (2usize..=5).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

fn play(participants: usize, outcomes: &[Outcome]) -> Vec<MatchUp> {
    let players = &PLAYERS[..participants];
    let mut match_ups = Vec::new();
    let mut outcomes = outcomes.iter();
    for (i, a) in players.iter().enumerate() {
        for b in &players[i + 1..] {
            let id = format!("m-{}-{}", a, b);
            let outcome = outcomes.next().copied().unwrap_or(Outcome::Side1);
            match_ups.push(match outcome {
                Outcome::Side1 => win(&id, a, b),
                Outcome::Side2 => win(&id, b, a),
                Outcome::Pending => pending(&id, a, b),
                Outcome::Walkover => {
                    decided(&id, a, b, MatchUpStatus::Walkover, Some(1), Vec::new())
                }
                Outcome::Retired => decided(
                    &id,
                    a,
                    b,
                    MatchUpStatus::Retired,
                    Some(2),
                    vec![set(6, 2), unfinished_set(1, 3)],
                ),
                Outcome::Abandoned => {
                    decided(&id, a, b, MatchUpStatus::Abandoned, None, Vec::new())
                }
            });
        }
    }
    match_ups
}

fn tally(match_ups: Vec<MatchUp>) -> TallyResult {
    tally_participant_results(&request(match_ups), &mut NoTrace).unwrap()
}

proptest! {
    #[test]
    fn every_participant_gets_finite_ratios((participants, outcomes) in arb_group()) {
        let result = tally(play(participants, &outcomes));

        prop_assert_eq!(result.participant_results.len(), participants);
        for (_, r) in result.participant_results.iter() {
            for value in [r.match_ups_pct, r.tie_match_ups_pct, r.sets_pct, r.games_pct, r.points_pct] {
                prop_assert!(value.is_finite());
            }
        }
    }

    #[test]
    fn wins_sets_and_games_balance((participants, outcomes) in arb_group()) {
        let result = tally(play(participants, &outcomes));
        let sum = |f: fn(&round_robin_tally::ParticipantResult) -> u32| {
            result.participant_results.iter().map(|(_, r)| f(r)).sum::<u32>()
        };

        prop_assert_eq!(sum(|r| r.match_ups_won), sum(|r| r.match_ups_lost));
        prop_assert_eq!(sum(|r| r.sets_won), sum(|r| r.sets_lost));
        prop_assert_eq!(sum(|r| r.games_won), sum(|r| r.games_lost));
        prop_assert_eq!(sum(|r| r.match_ups_cancelled) % 2, 0);
    }

    #[test]
    fn tally_is_repeatable((participants, outcomes) in arb_group()) {
        let match_ups = play(participants, &outcomes);
        prop_assert_eq!(tally(match_ups.clone()), tally(match_ups));
    }

    #[test]
    fn positions_never_decrease((participants, outcomes) in arb_group()) {
        let result = tally(play(participants, &outcomes));

        if result.bracket_complete {
            prop_assert_eq!(result.order.len(), participants);
        } else {
            prop_assert!(result.order.is_empty());
        }
        for pair in result.order.windows(2) {
            prop_assert!(pair[0].position <= pair[1].position);
        }
        if result.bracket_complete {
            let mut placed: Vec<&str> = result.order.iter().map(|p| p.participant_id.as_str()).collect();
            placed.sort_unstable();
            prop_assert_eq!(placed, PLAYERS[..participants].to_vec());
        }
        for position in &result.order {
            prop_assert!(position.position >= 1);
            prop_assert!(position.position as usize <= participants);
            prop_assert_eq!(position.rank_order, position.position);
        }
    }

    #[test]
    fn strict_hierarchy_resolves_regardless_of_directive_order(ranks in arb_ranking()) {
        let players = &PLAYERS[..ranks.len()];
        let outcomes: Vec<Outcome> = (0..ranks.len())
            .flat_map(|i| ((i + 1)..ranks.len()).map(move |j| (i, j)))
            .map(|(i, j)| if ranks[i] < ranks[j] { Outcome::Side1 } else { Outcome::Side2 })
            .collect();
        let match_ups = play(ranks.len(), &outcomes);

        let mut expected = players.to_vec();
        expected.sort_by_key(|id| ranks[players.iter().position(|p| p == id).unwrap_or(0)]);

        let mut directives = default_tally_directives();
        directives.reverse();
        let reversed = PolicyDefinitions {
            round_robin_tally: Some(TallyPolicy {
                tally_directives: directives,
                ..TallyPolicy::default()
            }),
        };
        for policy_definitions in [PolicyDefinitions::default(), reversed] {
            let result = tally_participant_results(
                &round_robin_tally::TallyRequest {
                    policy_definitions,
                    ..request(match_ups.clone())
                },
                &mut NoTrace,
            )
            .unwrap();
            let order: Vec<&str> = result.order.iter().map(|p| p.participant_id.as_str()).collect();
            prop_assert_eq!(order, expected.clone());
            prop_assert!(result.order.iter().all(|p| p.resolved));
        }
    }
}
