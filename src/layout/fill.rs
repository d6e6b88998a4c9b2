//! Remaining-assignment placement.
//!
//! Drains the triples still pending after the fixed stamps and meeting
//! placement. The driver seeds each grade with a handful of random
//! placements, then prefers cells period-adjacent to an existing
//! same-grade cell in the same column — so a subject teacher keeps
//! teaching the same grade in consecutive periods and changes curriculum
//! less often. A first-open-slot sweep finishes the job for anything the
//! adjacency pass skipped.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::context::LayoutContext;
use super::legality::can_place;

/// Places every pending triple it can.
///
/// Triples with no legal cell anywhere stay in the remaining set and are
/// reported by the caller as unsatisfied placements.
pub fn fill_remaining<R: Rng>(ctx: &mut LayoutContext, rng: &mut R) {
    let mut pending = ctx.remaining_list();
    pending.shuffle(rng);

    // Plant random seeds per grade, then grow placements next to them
    let max_seeds = ctx.options.max_seeds_per_grade;
    let mut seeds_per_grade: HashMap<String, usize> = HashMap::new();
    for p in &pending {
        let planted = seeds_per_grade.entry(p.grade_id.clone()).or_insert(0);
        if *planted < max_seeds {
            place_random(ctx, rng, &p.class_id, &p.subject_id);
            *planted += 1;
        } else {
            place_adjacent(ctx, rng, &p.class_id, &p.subject_id);
        }
    }

    // Sweep: anything with a legal cell left still lands somewhere
    let mut pending = ctx.remaining_list();
    pending.shuffle(rng);
    for p in &pending {
        place_first_open(ctx, rng, &p.class_id, &p.subject_id);
    }
}

/// Places into the first legal cell in priority order.
pub fn place_first_open<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    class_id: &str,
    subject_id: &str,
) -> bool {
    let Some(&subject) = ctx.subject_index.get(subject_id) else {
        return false;
    };
    for day in ctx.day_order(rng) {
        for period in ctx.period_order(rng) {
            if can_place(ctx, class_id, day, period, subject) {
                ctx.place(class_id, day, period, subject, None);
                return true;
            }
        }
    }
    false
}

/// Places into a legal cell drawn in randomized order.
///
/// The lowest-priority period is kept free so lunch stamping has
/// somewhere to land.
pub fn place_random<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    class_id: &str,
    subject_id: &str,
) -> bool {
    let Some(&subject) = ctx.subject_index.get(subject_id) else {
        return false;
    };
    let skip = ctx.lowest_priority_period();
    for day in ctx.day_order_shuffled(rng) {
        for period in ctx.period_order_shuffled(rng) {
            if Some(period) == skip {
                continue;
            }
            if can_place(ctx, class_id, day, period, subject) {
                ctx.place(class_id, day, period, subject, None);
                return true;
            }
        }
    }
    false
}

/// Places into the first legal cell adjacent to a same-grade cell in the
/// same subject column. Fails (leaving the triple pending for the sweep)
/// when no adjacent legal cell exists.
pub fn place_adjacent<R: Rng>(
    ctx: &mut LayoutContext,
    rng: &mut R,
    class_id: &str,
    subject_id: &str,
) -> bool {
    let Some(&subject) = ctx.subject_index.get(subject_id) else {
        return false;
    };
    let skip = ctx.lowest_priority_period();
    for day in ctx.day_order(rng) {
        for period in ctx.period_order(rng) {
            if Some(period) == skip {
                continue;
            }
            if can_place(ctx, class_id, day, period, subject)
                && is_adjacent_to_same_grade(ctx, class_id, day, period, subject)
            {
                log::debug!("adjacent slot for {class_id}: day {day} period {period} {subject_id}");
                ctx.place(class_id, day, period, subject, None);
                return true;
            }
        }
    }
    false
}

/// Whether a neighboring period in the same (day, subject) column holds a
/// class of the same grade.
fn is_adjacent_to_same_grade(
    ctx: &LayoutContext,
    class_id: &str,
    day: usize,
    period: usize,
    subject: usize,
) -> bool {
    let Some(class) = ctx.class(class_id) else {
        return false;
    };
    let next = (period + 1 < ctx.periods.len()).then_some(period + 1);
    for adj in [next, period.checked_sub(1)].into_iter().flatten() {
        let neighbor_grade = ctx
            .grid
            .get(day, adj, subject)
            .and_then(|cell| cell.class_id())
            .and_then(|id| ctx.class(id));
        if neighbor_grade.is_some_and(|c| c.grade_id == class.grade_id) {
            return true;
        }
    }
    false
}
