//! Finishing order of a round robin group.
//!
//! Participants are first partitioned by the primary attribute (matchUps won unless the
//! policy names another group order key). Every partition with more than one member is then
//! resolved recursively: head-to-head for pairs, otherwise the first tally directive that
//! splits the tie. Each directive is a separator strategy (attribute, direction, scope,
//! size limit) applied by the same generic partition function.

use crate::logic::participant_results::{get_participant_results, ParticipantResultsParams};
use crate::models::{
    FinishingPosition, MatchUp, MatchUpFormat, ParticipantId, ParticipantResult,
    ParticipantResults, ReportAttribute, ReportGroup, ReportStep, StepKind, TallyAttribute,
    TallyDirective, TallyPolicy,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Attributes that make up the GEMscore, highest weight first.
const GEM_SCORE_ATTRIBUTES: [TallyAttribute; 5] = [
    TallyAttribute::MatchUpsPct,
    TallyAttribute::TieMatchUpsPct,
    TallyAttribute::SetsPct,
    TallyAttribute::GamesPct,
    TallyAttribute::PointsPct,
];

/// Inputs of the resolver.
#[derive(Clone, Copy, Debug)]
pub struct GroupOrderParams<'a> {
    pub participant_results: &'a ParticipantResults,
    /// Participants in the group; each should play `participants_count - 1` matchUps.
    pub participants_count: usize,
    /// MatchUps used to recompute results among tied participants (`idsFilter`).
    pub match_ups: &'a [MatchUp],
    pub match_up_format: &'a MatchUpFormat,
    pub tally_policy: &'a TallyPolicy,
    /// Tiebreak of last resort for tied participants (e.g. from seeding).
    pub sub_order_map: Option<&'a HashMap<ParticipantId, u32>>,
    /// Refuse to order a group where someone still has matchUps to play.
    pub require_completion: bool,
}

/// Resolved order plus the decisions that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupOrder {
    pub order: Vec<FinishingPosition>,
    pub report: Vec<ReportStep>,
}

/// Entry of the flattened recursion, before positions are assigned.
#[derive(Clone, Debug)]
struct Placement {
    participant_id: ParticipantId,
    resolved: bool,
    sub_group: Option<Vec<usize>>,
}

type Partition = Vec<(f64, Vec<ParticipantId>)>;

/// Order the group, or None when completion is required and the group is not complete.
pub fn get_group_order(params: &GroupOrderParams<'_>) -> Option<GroupOrder> {
    let results = params.participant_results;

    if params.require_completion {
        let expected = params.participants_count.saturating_sub(1);
        let incomplete = results
            .iter()
            .any(|(_, r)| r.match_ups_accounted() as usize != expected);
        if incomplete {
            log::debug!("group order withheld: not every participant has completed play");
            return None;
        }
    }

    let mut resolver = Resolver {
        params,
        report: Vec::new(),
        placements: Vec::new(),
    };

    let attribute = params.tally_policy.primary_attribute();
    let ids = results.ids().to_vec();
    let groups = partition(&ids, results, attribute, false);
    resolver.report.push(ReportStep {
        kind: StepKind::Grouped,
        attribute: Some(ReportAttribute::Tally(attribute)),
        reversed: false,
        ids_filter: false,
        participant_ids: ids,
        groups: report_groups(&groups),
        excluded_directives: Vec::new(),
    });

    for (index, (_, group)) in groups.into_iter().enumerate() {
        resolver.sub_sort(group, vec![index], true);
    }

    let Resolver {
        report, placements, ..
    } = resolver;
    let order = finishing_positions(placements, params);
    Some(GroupOrder { order, report })
}

/// Weighted composite of the participant's ratios.
///
/// Each ratio is rounded to thousandths and scaled by its power-of-ten weight, so the score
/// reads like the ratios concatenated in priority order. It is reported, never ranked on.
pub fn gem_score(result: &ParticipantResult, policy: &TallyPolicy) -> f64 {
    GEM_SCORE_ATTRIBUTES
        .iter()
        .filter(|attribute| {
            policy
                .gem_score
                .as_ref()
                .map_or(true, |subset| subset.contains(*attribute))
        })
        .filter_map(|attribute| {
            attribute
                .gem_score_weight()
                .map(|weight| (attribute.value(result) * 1000.0).round() * 10f64.powi(weight))
        })
        .sum()
}

struct Resolver<'a> {
    params: &'a GroupOrderParams<'a>,
    report: Vec<ReportStep>,
    placements: Vec<Placement>,
}

impl Resolver<'_> {
    fn sub_sort(&mut self, ids: Vec<ParticipantId>, path: Vec<usize>, head_to_head: bool) {
        let policy = self.params.tally_policy;

        if ids.len() == 1 {
            self.place(ids, true, None);
            return;
        }

        if ids.len() == 2 && head_to_head && !policy.head_to_head.disabled {
            if let Some([winner, loser]) = self.head_to_head_winner(&ids[0], &ids[1]) {
                log::debug!("head-to-head: {} over {}", winner, loser);
                self.report.push(ReportStep {
                    kind: StepKind::Separated,
                    attribute: Some(ReportAttribute::HeadToHead),
                    reversed: false,
                    ids_filter: false,
                    participant_ids: ids.clone(),
                    groups: vec![
                        ReportGroup {
                            value: 1.0,
                            participant_ids: vec![winner.clone()],
                        },
                        ReportGroup {
                            value: 0.0,
                            participant_ids: vec![loser.clone()],
                        },
                    ],
                    excluded_directives: Vec::new(),
                });
                self.place(vec![winner, loser], true, None);
                return;
            }
        }

        let (applicable, excluded): (Vec<TallyDirective>, Vec<TallyDirective>) = policy
            .tally_directives
            .iter()
            .copied()
            .partition(|directive| directive.applies_to(ids.len()));

        for directive in &applicable {
            let groups = self.separate(&ids, directive);
            if groups.len() < 2 {
                continue;
            }
            log::debug!(
                "{} participants separated by {} into {} groups",
                ids.len(),
                directive.attribute,
                groups.len()
            );
            self.report.push(ReportStep {
                kind: StepKind::Separated,
                attribute: Some(ReportAttribute::Tally(directive.attribute)),
                reversed: directive.reversed,
                ids_filter: directive.ids_filter,
                participant_ids: ids,
                groups: report_groups(&groups),
                excluded_directives: excluded,
            });
            for (index, (_, group)) in groups.into_iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(index);
                self.sub_sort(group, child_path, !directive.disable_head_to_head);
            }
            return;
        }

        log::debug!("{} participants remain tied", ids.len());
        self.report.push(ReportStep {
            kind: StepKind::Unresolved,
            attribute: None,
            reversed: false,
            ids_filter: false,
            participant_ids: ids.clone(),
            groups: Vec::new(),
            excluded_directives: excluded,
        });
        self.place(ids, false, Some(path));
    }

    fn place(&mut self, ids: Vec<ParticipantId>, resolved: bool, sub_group: Option<Vec<usize>>) {
        self.placements
            .extend(ids.into_iter().map(|participant_id| Placement {
                participant_id,
                resolved,
                sub_group: sub_group.clone(),
            }));
    }

    /// Winner and loser of the direct encounters, if one side won more of them.
    fn head_to_head_winner(&self, a: &ParticipantId, b: &ParticipantId) -> Option<[ParticipantId; 2]> {
        let wins = |id: &ParticipantId, over: &ParticipantId| {
            self.params
                .participant_results
                .get(id)
                .map_or(0, |r| r.victories.iter().filter(|v| *v == over).count())
        };
        match wins(a, b).cmp(&wins(b, a)) {
            Ordering::Greater => Some([a.clone(), b.clone()]),
            Ordering::Less => Some([b.clone(), a.clone()]),
            Ordering::Equal => None,
        }
    }

    /// Partition `ids` by the directive, recomputing results among `ids` when asked to.
    fn separate(&self, ids: &[ParticipantId], directive: &TallyDirective) -> Partition {
        if !directive.ids_filter {
            return partition(
                ids,
                self.params.participant_results,
                directive.attribute,
                directive.reversed,
            );
        }
        let outcome = get_participant_results(&ParticipantResultsParams {
            match_ups: self.params.match_ups,
            participant_ids: Some(ids),
            roster: ids,
            match_up_format: self.params.match_up_format,
            tally_policy: self.params.tally_policy,
            per_player: 0,
        });
        partition(
            ids,
            &outcome.participant_results,
            directive.attribute,
            directive.reversed,
        )
    }
}

/// Group `ids` by attribute value, best group first; input order is kept within a group.
fn partition(
    ids: &[ParticipantId],
    results: &ParticipantResults,
    attribute: TallyAttribute,
    reversed: bool,
) -> Partition {
    let mut groups: Partition = Vec::new();
    for id in ids {
        let value = results.get(id).map_or(0.0, |r| attribute.value(r));
        match groups.iter_mut().find(|(key, _)| *key == value) {
            Some((_, members)) => members.push(id.clone()),
            None => groups.push((value, vec![id.clone()])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| {
        let ordering = b.partial_cmp(a).unwrap_or(Ordering::Equal);
        if reversed {
            ordering.reverse()
        } else {
            ordering
        }
    });
    groups
}

fn report_groups(groups: &Partition) -> Vec<ReportGroup> {
    groups
        .iter()
        .map(|(value, ids)| ReportGroup {
            value: *value,
            participant_ids: ids.clone(),
        })
        .collect()
}

/// Assign positions, ties, sub orders and GEMscores to the flattened placements.
fn finishing_positions(placements: Vec<Placement>, params: &GroupOrderParams<'_>) -> Vec<FinishingPosition> {
    let mut positions = Vec::with_capacity(placements.len());
    let mut position = 0;
    let mut prior_cluster: Option<&Vec<usize>> = None;
    for (index, placement) in placements.iter().enumerate() {
        if placement.resolved || prior_cluster != placement.sub_group.as_ref() {
            position = u32::try_from(index + 1).unwrap_or(u32::MAX);
        }
        prior_cluster = if placement.resolved {
            None
        } else {
            placement.sub_group.as_ref()
        };
        positions.push(position);
    }

    let mut shared: HashMap<u32, u32> = HashMap::new();
    for position in &positions {
        *shared.entry(*position).or_default() += 1;
    }

    placements
        .into_iter()
        .zip(positions)
        .map(|(placement, position)| {
            let ties = shared.get(&position).copied().filter(|count| *count > 1);
            let sub_order = ties.and_then(|_| {
                params
                    .sub_order_map
                    .and_then(|map| map.get(&placement.participant_id).copied())
            });
            let gem_score = params
                .participant_results
                .get(&placement.participant_id)
                .map_or(0.0, |r| gem_score(r, params.tally_policy));
            FinishingPosition {
                participant_id: placement.participant_id,
                resolved: placement.resolved,
                position,
                sub_group: placement.sub_group,
                group_order: position.saturating_add(sub_order.unwrap_or(1).max(1) - 1),
                rank_order: position,
                sub_order,
                ties,
                gem_score,
            }
        })
        .collect()
}
