//! The slot legality predicate.
//!
//! Every placement phase — meeting search, random fill, adjacency fill,
//! the final sweep — consults this single predicate. It is side-effect
//! free; applying a placement and re-asking immediately returns `false`.

use super::context::LayoutContext;

/// Whether the class may legally be placed at (day, period, subject).
///
/// A candidate cell is legal iff all of:
/// 1. The (grade, subject, class) triple is still in the remaining set.
/// 2. The period does not block the class's grade.
/// 3. The class is not already assigned elsewhere in the same (day,
///    period) row — a class cannot be in two subjects at once.
/// 4. The subject column has an empty cell in some *other* lunch period
///    of the same day, so the subject's teacher can still be given a
///    lunch break later. Skipped when the week has no lunch periods or
///    the open-lunch rule is disabled in the options.
/// 5. The target cell itself is empty.
pub fn can_place(
    ctx: &LayoutContext,
    class_id: &str,
    day: usize,
    period: usize,
    subject: usize,
) -> bool {
    let Some(class) = ctx.class(class_id) else {
        return false;
    };

    if !ctx.is_remaining(&class.grade_id, &ctx.subjects[subject].id, class_id) {
        return false;
    }

    if ctx.periods[period].blocks_grade(&class.grade_id) {
        return false;
    }

    // Class must not be doing something else at this time
    let class_in_use = ctx
        .grid
        .row(day, period)
        .flatten()
        .any(|cell| cell.class_id() == Some(class_id));
    if class_in_use {
        return false;
    }

    // Subject must keep a different open lunch spot in the day
    if ctx.options.require_open_lunch && ctx.has_lunch_periods {
        let has_open_lunch = ctx.periods.iter().enumerate().any(|(other, p)| {
            p.lunch && other != period && ctx.grid.is_empty(day, other, subject)
        });
        if !has_open_lunch {
            return false;
        }
    }

    ctx.grid.is_empty(day, period, subject)
}
