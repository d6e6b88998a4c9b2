//! Grade meeting placement.
//!
//! Every grade with at least two classes needs synchronized periods where
//! all of its classes are in specials at once, so the grade's homeroom
//! teachers can meet:
//!
//! - **Team meeting**: one period per week.
//! - **Articulation meeting**: two consecutive periods per week.
//!
//! A meeting occupies a contiguous block of subject columns at one
//! (day, period). The search walks days and periods in priority order,
//! slides the column block across offsets, and tries every permutation of
//! the grade's classes against the legality predicate, taking the first
//! full match. Only contiguous column blocks are considered; this keeps
//! the group renderable as one merged region and prunes the search.
//!
//! The enumeration is factorial in roster size — validation caps rosters
//! at [`MAX_MEETING_CLASSES`](crate::validation::MAX_MEETING_CLASSES).

use log::warn;
use rand::Rng;

use super::context::LayoutContext;
use super::legality::can_place;
use super::{MeetingFailure, MeetingKind};

/// Places a team meeting for every grade that needs one.
///
/// A grade with no legal (day, period, offset, permutation) combination
/// gets a recoverable failure record; its classes stay in the remaining
/// set and compete for slots in the generic fill phase.
pub fn create_team_meetings<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    failures: &mut Vec<MeetingFailure>,
) {
    create_meetings(ctx, rng, MeetingKind::Team, failures);
}

/// Places an articulation meeting for every grade that needs one.
pub fn create_artic_meetings<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    failures: &mut Vec<MeetingFailure>,
) {
    create_meetings(ctx, rng, MeetingKind::Articulation, failures);
}

fn create_meetings<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    kind: MeetingKind,
    failures: &mut Vec<MeetingFailure>,
) {
    for grade_idx in ctx.grade_order().to_vec() {
        let grade = ctx.grades[grade_idx].clone();
        if !grade.needs_meetings() {
            continue;
        }

        let mut created = false;
        'search: for day in ctx.day_order(rng) {
            for period in ctx.period_order(rng) {
                created = match kind {
                    MeetingKind::Team => try_team_at(ctx, &grade, day, period),
                    MeetingKind::Articulation => try_artic_at(ctx, &grade, day, period),
                };
                if created {
                    break 'search;
                }
            }
        }

        if !created {
            warn!(
                "could not find a grade-level {} meeting for grade {}",
                kind.label(),
                grade.id
            );
            failures.push(MeetingFailure {
                grade_id: grade.id.clone(),
                kind,
            });
        }
    }
}

/// Tries to fit all of a grade's classes into one (day, period).
///
/// Slides a contiguous column block across offsets; for each offset,
/// takes the first permutation of the roster whose every (class, column)
/// pair is legal, writes it with the team group tag, and stops.
fn try_team_at(ctx: &mut LayoutContext, grade: &crate::models::Grade, day: usize, period: usize) -> bool {
    let roster = &grade.class_ids;
    let Some(max_offset) = ctx.subjects.len().checked_sub(roster.len()) else {
        return false;
    };
    let group = format!("Grade {}\n TEAM", grade.id);
    let perms = permutations(roster);

    for offset in 0..=max_offset {
        for perm in &perms {
            if permutation_matches(ctx, perm, offset, day, period) {
                apply_permutation(ctx, perm, offset, day, period, &group);
                return true;
            }
        }
    }
    false
}

/// Tries to fit all of a grade's classes into two consecutive periods
/// starting at `period`.
///
/// The first and second periods may use different permutations of the
/// roster, but share the same day and column block. A permutation that
/// matches the first period is applied before testing the second (the
/// application changes what is legal there); if no permutation fits the
/// second period, the first is undone and the search continues.
fn try_artic_at(ctx: &mut LayoutContext, grade: &crate::models::Grade, day: usize, period: usize) -> bool {
    if ctx.periods[period].do_not_start_artic {
        return false;
    }
    let roster = &grade.class_ids;
    let Some(max_offset) = ctx.subjects.len().checked_sub(roster.len()) else {
        return false;
    };
    let group = format!("Grade {}\n ARTIC", grade.id);
    let perms = permutations(roster);

    for offset in 0..=max_offset {
        for first in &perms {
            if !permutation_matches(ctx, first, offset, day, period) {
                continue;
            }
            apply_permutation(ctx, first, offset, day, period, &group);
            for second in &perms {
                if permutation_matches(ctx, second, offset, day, period + 1) {
                    apply_permutation(ctx, second, offset, day, period + 1, &group);
                    return true;
                }
            }
            remove_permutation(ctx, first, offset, day, period);
        }
    }
    false
}

/// Whether every class of the permutation can legally take its column.
fn permutation_matches(
    ctx: &LayoutContext,
    perm: &[String],
    offset: usize,
    day: usize,
    period: usize,
) -> bool {
    if period >= ctx.periods.len() {
        return false;
    }
    perm.iter()
        .enumerate()
        .all(|(i, class_id)| can_place(ctx, class_id, day, period, offset + i))
}

fn apply_permutation(
    ctx: &mut LayoutContext,
    perm: &[String],
    offset: usize,
    day: usize,
    period: usize,
    group: &str,
) {
    for (i, class_id) in perm.iter().enumerate() {
        ctx.place(class_id, day, period, offset + i, Some(group));
    }
}

fn remove_permutation(
    ctx: &mut LayoutContext,
    perm: &[String],
    offset: usize,
    day: usize,
    period: usize,
) {
    for (i, class_id) in perm.iter().enumerate() {
        ctx.remove(class_id, day, period, offset + i);
    }
}

/// All orderings of `items`, by naive recursive enumeration.
///
/// Factorial in `items.len()`; callers bound the input size.
pub(crate) fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}
