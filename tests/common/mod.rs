//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use round_robin_tally::{
    get_participant_results, FinishingPosition, MatchUp, MatchUpFormat, MatchUpStatus,
    MatchUpType, ParticipantId, ParticipantResults, ParticipantResultsParams, Score, SetScore,
    Side, TallyPolicy, TallyRequest,
};

pub const STRUCTURE: &str = "rr-group-1";

pub fn side(side_number: u8, id: &str) -> Side {
    Side {
        side_number: Some(side_number),
        participant_id: Some(id.to_string()),
        participant_name: Some(format!("Player {}", id.to_uppercase())),
    }
}

/// Draw position encoded in ids like "p3".
pub fn draw_position(id: &str) -> u32 {
    id.trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .unwrap_or(0)
}

/// A finished set; the higher score wins it.
pub fn set(side1: u32, side2: u32) -> SetScore {
    let winning_side = match side1.cmp(&side2) {
        std::cmp::Ordering::Greater => Some(1),
        std::cmp::Ordering::Less => Some(2),
        std::cmp::Ordering::Equal => None,
    };
    SetScore {
        side1_score: Some(side1),
        side2_score: Some(side2),
        winning_side,
        ..SetScore::default()
    }
}

/// A set interrupted before anyone won it.
pub fn unfinished_set(side1: u32, side2: u32) -> SetScore {
    SetScore {
        side1_score: Some(side1),
        side2_score: Some(side2),
        ..SetScore::default()
    }
}

pub fn tiebreak_set(side1: u32, side2: u32, tiebreak1: u32, tiebreak2: u32) -> SetScore {
    SetScore {
        side1_tiebreak_score: Some(tiebreak1),
        side2_tiebreak_score: Some(tiebreak2),
        ..set(side1, side2)
    }
}

/// A match tiebreak recorded in the tiebreak scores only.
pub fn match_tiebreak(tiebreak1: u32, tiebreak2: u32) -> SetScore {
    SetScore {
        side1_tiebreak_score: Some(tiebreak1),
        side2_tiebreak_score: Some(tiebreak2),
        winning_side: if tiebreak1 > tiebreak2 { Some(1) } else { Some(2) },
        ..SetScore::default()
    }
}

pub fn score(sets: Vec<SetScore>) -> Option<Score> {
    let sets = sets
        .into_iter()
        .enumerate()
        .map(|(i, s)| SetScore {
            set_number: Some(i as u32 + 1),
            ..s
        })
        .collect();
    Some(Score {
        sets,
        ..Score::default()
    })
}

pub fn decided(
    id: &str,
    side1: &str,
    side2: &str,
    status: MatchUpStatus,
    winning_side: Option<u8>,
    sets: Vec<SetScore>,
) -> MatchUp {
    MatchUp {
        match_up_id: id.to_string(),
        structure_id: STRUCTURE.to_string(),
        match_up_status: status,
        winning_side,
        sides: vec![side(1, side1), side(2, side2)],
        score: if sets.is_empty() { None } else { score(sets) },
        draw_positions: vec![draw_position(side1), draw_position(side2)],
        ..MatchUp::default()
    }
}

/// Completed matchUp; the side with more sets wins.
pub fn completed(id: &str, side1: &str, side2: &str, sets: Vec<SetScore>) -> MatchUp {
    let won = |n: u8| sets.iter().filter(|s| s.winning_side == Some(n)).count();
    let winning_side = if won(1) > won(2) { Some(1) } else { Some(2) };
    decided(id, side1, side2, MatchUpStatus::Completed, winning_side, sets)
}

/// `winner` beats `loser` 6-3 6-3.
pub fn win(id: &str, winner: &str, loser: &str) -> MatchUp {
    completed(id, winner, loser, vec![set(6, 3), set(6, 3)])
}

pub fn pending(id: &str, side1: &str, side2: &str) -> MatchUp {
    decided(id, side1, side2, MatchUpStatus::ToBePlayed, None, Vec::new())
}

/// A rubber of a team matchUp.
pub fn rubber(
    id: &str,
    match_up_type: MatchUpType,
    side1: &str,
    side2: &str,
    sets: Vec<SetScore>,
) -> MatchUp {
    MatchUp {
        match_up_type,
        draw_positions: Vec::new(),
        ..completed(id, side1, side2, sets)
    }
}

/// TEAM matchUp between `team1` and `team2` with the given rubbers.
pub fn team_match_up(id: &str, team1: &str, team2: &str, ties: Vec<MatchUp>) -> MatchUp {
    let won = |n: u8| ties.iter().filter(|t| t.winning_side == Some(n)).count();
    let all_done = ties.iter().all(|t| t.match_up_status.is_complete());
    let winning_side = match (all_done, won(1).cmp(&won(2))) {
        (true, std::cmp::Ordering::Greater) => Some(1),
        (true, std::cmp::Ordering::Less) => Some(2),
        _ => None,
    };
    MatchUp {
        match_up_type: MatchUpType::Team,
        match_up_status: if winning_side.is_some() {
            MatchUpStatus::Completed
        } else {
            MatchUpStatus::InProgress
        },
        winning_side,
        tie_match_ups: ties,
        score: None,
        ..decided(id, team1, team2, MatchUpStatus::Completed, None, Vec::new())
    }
}

pub fn ids(participants: &[&str]) -> Vec<ParticipantId> {
    participants.iter().map(|p| p.to_string()).collect()
}

pub fn aggregate(match_ups: &[MatchUp], policy: &TallyPolicy) -> ParticipantResults {
    get_participant_results(&ParticipantResultsParams {
        match_ups,
        participant_ids: None,
        roster: &[],
        match_up_format: &MatchUpFormat::default(),
        tally_policy: policy,
        per_player: 0,
    })
    .participant_results
}

pub fn request(match_ups: Vec<MatchUp>) -> TallyRequest {
    TallyRequest {
        match_ups,
        ..TallyRequest::default()
    }
}

pub fn order_ids(order: &[FinishingPosition]) -> Vec<&str> {
    order.iter().map(|p| p.participant_id.as_str()).collect()
}

pub fn positions(order: &[FinishingPosition]) -> Vec<u32> {
    order.iter().map(|p| p.position).collect()
}

/// Complete round robin among `participants`: `beats(a, b)` decides each pairing.
pub fn round_robin(participants: &[&str], beats: impl Fn(&str, &str) -> bool) -> Vec<MatchUp> {
    let mut match_ups = Vec::new();
    for (i, a) in participants.iter().enumerate() {
        for b in &participants[i + 1..] {
            let id = format!("m-{}-{}", a, b);
            if beats(a, b) {
                match_ups.push(win(&id, a, b));
            } else {
                match_ups.push(win(&id, b, a));
            }
        }
    }
    match_ups
}
