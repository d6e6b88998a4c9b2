//! Fixed-slot stamps.
//!
//! Deterministic, unconditional cell writes. Row stamps (early release,
//! events) run before the search phases so they constrain, rather than
//! compete with, later placement; lunch marking runs after placement and
//! claims the lowest-priority lunch cell still open per (day, subject).

use rand::Rng;

use super::context::LayoutContext;
use crate::models::{Cell, FixedCell, PeriodPick};

/// Applies the week's fixed-slot rules.
///
/// Each rule stamps an entire (day, period) row — every subject column —
/// with its marker. Rules naming unknown days or periods are ignored.
pub fn apply_fixed_slots(ctx: &mut LayoutContext) {
    let rules = ctx.fixed_slots.clone();
    for rule in rules {
        let Some(&day) = ctx.day_index.get(&rule.day_id) else {
            continue;
        };
        let period = match &rule.period {
            PeriodPick::LastPeriod => ctx.periods.len().checked_sub(1),
            PeriodPick::Id(id) => ctx.period_index.get(id).copied(),
        };
        let Some(period) = period else {
            continue;
        };
        let cell = match rule.cell {
            FixedCell::EarlyRelease => Cell::EarlyRelease,
            FixedCell::Events => Cell::Events,
        };
        for subject in 0..ctx.subjects.len() {
            ctx.grid.set(day, period, subject, cell.clone());
        }
    }
}

/// Stamps one lunch cell per (day, subject).
///
/// Periods are scanned in reverse priority order so lunch lands in the
/// lowest-priority lunch period still open, keeping better periods free
/// for real placement.
pub fn mark_lunch<R: Rng>(ctx: &mut LayoutContext, rng: &mut R) {
    for day in 0..ctx.days.len() {
        for subject in 0..ctx.subjects.len() {
            let mut order = ctx.period_order(rng);
            order.reverse();
            for period in order {
                if ctx.periods[period].lunch && ctx.grid.is_empty(day, period, subject) {
                    ctx.grid.set(day, period, subject, Cell::Lunch);
                    break;
                }
            }
        }
    }
}
