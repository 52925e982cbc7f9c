//! Human-readable rendering of the tie-break audit trail.

use crate::models::{FinishingPosition, MatchUp, ReportAttribute, ReportStep, StepKind};
use std::collections::HashMap;

/// Display names by participantId, taken from matchUp sides (team rubbers included).
fn participant_names(match_ups: &[MatchUp]) -> HashMap<&str, &str> {
    let mut names = HashMap::new();
    let mut pending: Vec<&MatchUp> = match_ups.iter().collect();
    while let Some(match_up) = pending.pop() {
        for side in &match_up.sides {
            if let (Some(id), Some(name)) = (&side.participant_id, &side.participant_name) {
                names.entry(id.as_str()).or_insert(name.as_str());
            }
        }
        pending.extend(match_up.tie_match_ups.iter());
    }
    names
}

fn describe_step(number: usize, step: &ReportStep) -> String {
    let count = step.participant_ids.len();
    match step.kind {
        StepKind::Unresolved => format!(
            "Step {}: {} participants could not be separated",
            number, count
        ),
        StepKind::Grouped | StepKind::Separated => {
            let verb = if step.kind == StepKind::Grouped {
                "grouped"
            } else {
                "separated"
            };
            let direction = if step.reversed { " in reverse order" } else { "" };
            format!(
                "Step {}: {} participants were {}{} by `{}`",
                number,
                count,
                verb,
                direction,
                step.attribute.map_or("", ReportAttribute::name)
            )
        }
    }
}

/// Render `report` and the final `order` as text.
pub fn build_readable_report(
    match_ups: &[MatchUp],
    report: &[ReportStep],
    order: &[FinishingPosition],
) -> String {
    let names = participant_names(match_ups);
    let name = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

    let mut lines = Vec::new();
    for (index, step) in report.iter().enumerate() {
        lines.push(describe_step(index + 1, step));
        if step.ids_filter {
            lines.push("  (only matchUps between these participants were considered)".to_string());
        }

        let mut groups: Vec<_> = step.groups.iter().collect();
        groups.sort_by(|a, b| b.value.total_cmp(&a.value));
        for group in groups {
            let members: Vec<String> = group.participant_ids.iter().map(|id| name(id.as_str())).collect();
            lines.push(format!("  {}: {}", group.value, members.join(", ")));
        }

        if step.kind == StepKind::Unresolved {
            let members: Vec<String> = step.participant_ids.iter().map(|id| name(id.as_str())).collect();
            lines.push(format!("  tied: {}", members.join(", ")));
        }

        if !step.excluded_directives.is_empty() {
            let excluded: Vec<String> = step
                .excluded_directives
                .iter()
                .map(|d| match d.max_participants {
                    Some(max) => format!("{} (maxParticipants {})", d.attribute, max),
                    None => d.attribute.to_string(),
                })
                .collect();
            lines.push(format!("  Excluded directives: {}", excluded.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Final Order:".to_string());
    for position in order {
        let resolution = if position.resolved {
            "resolved"
        } else {
            "unresolved"
        };
        lines.push(format!(
            "  {}: {} ({})",
            position.group_order,
            name(position.participant_id.as_str()),
            resolution
        ));
    }

    lines.join("\n")
}
