//! Per-run layout state.
//!
//! [`LayoutContext`] owns everything one generate run mutates: the grid,
//! the remaining-assignment set, the id/index lookups, and the filtered
//! priority queues. It is rebuilt from scratch for every run — no state
//! leaks across runs, and two runs can exist side by side (in tests, for
//! example) without touching each other.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::priority::{filter_entries, resolve_order, resolve_order_shuffled};
use super::LayoutOptions;
use crate::models::{
    Cell, ClassCell, ClassRef, Configuration, Day, FixedSlotRule, Grade, Grid, Period,
    PriorityEntry, Subject, WeekShape,
};

/// A (grade, subject, class) triple still needing a slot.
///
/// Presence in the remaining set means "this class still needs a slot
/// under this subject". Every triple not excluded by a subject's grade
/// block is exactly once either remaining or placed — never both, never
/// neither — until layout completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAssignment {
    /// Owning grade id.
    pub grade_id: String,
    /// Subject column id.
    pub subject_id: String,
    /// Class id.
    pub class_id: String,
}

/// All state owned by one in-flight layout run.
pub struct LayoutContext {
    pub(crate) days: Vec<Day>,
    pub(crate) periods: Vec<Period>,
    pub(crate) grades: Vec<Grade>,
    pub(crate) subjects: Vec<Subject>,

    pub(crate) day_index: HashMap<String, usize>,
    pub(crate) period_index: HashMap<String, usize>,
    pub(crate) grade_index: HashMap<String, usize>,
    pub(crate) subject_index: HashMap<String, usize>,
    class_lookup: HashMap<String, ClassRef>,

    day_priority: Vec<PriorityEntry>,
    period_priority: Vec<PriorityEntry>,
    grade_order: Vec<usize>,
    pub(crate) fixed_slots: Vec<FixedSlotRule>,
    pub(crate) has_lunch_periods: bool,

    /// The result grid.
    pub grid: Grid,
    remaining: HashSet<PendingAssignment>,
    /// Options for this run.
    pub options: LayoutOptions,
}

impl LayoutContext {
    /// Builds a fresh context for one run.
    ///
    /// Assigns stable indices (position in the week/configuration order),
    /// builds the lookups, pre-stamps permanently blocked cells from each
    /// subject's blocked times, seeds the remaining set with every triple
    /// not excluded by a subject's grade block, and resolves the grade
    /// visitation order once for the run.
    pub fn new<R: Rng>(
        config: &Configuration,
        week: &WeekShape,
        options: LayoutOptions,
        rng: &mut R,
    ) -> Self {
        let days = week.days.clone();
        let periods = week.periods.clone();
        let grades = config.grades.clone();
        let subjects = config.subjects.clone();

        let day_index = build_index(days.iter().map(|d| d.id.clone()));
        let period_index = build_index(periods.iter().map(|p| p.id.clone()));
        let grade_index = build_index(grades.iter().map(|g| g.id.clone()));
        let subject_index = build_index(subjects.iter().map(|s| s.id.clone()));

        let mut class_lookup = HashMap::new();
        for grade in &grades {
            for class_id in &grade.class_ids {
                class_lookup.insert(
                    class_id.clone(),
                    ClassRef {
                        id: class_id.clone(),
                        grade_id: grade.id.clone(),
                    },
                );
            }
        }

        let day_priority = effective_priority(&week.day_priority, &day_index, &days, |d| &d.id);
        let period_priority =
            effective_priority(&week.period_priority, &period_index, &periods, |p| &p.id);
        let grade_priority =
            effective_priority(&week.grade_priority, &grade_index, &grades, |g| &g.id);
        let grade_order = resolve_order(&grade_priority, &grade_index, rng);

        let mut grid = Grid::new(days.len(), periods.len(), subjects.len());
        for (d, day) in days.iter().enumerate() {
            for (p, period) in periods.iter().enumerate() {
                for (s, subject) in subjects.iter().enumerate() {
                    if subject.is_blocked_at(&day.id, &period.id) {
                        grid.set(d, p, s, Cell::Blocked);
                    }
                }
            }
        }

        let mut remaining = HashSet::new();
        for grade in &grades {
            for subject in &subjects {
                if subject.blocks_grade(&grade.id) {
                    continue;
                }
                for class_id in &grade.class_ids {
                    remaining.insert(PendingAssignment {
                        grade_id: grade.id.clone(),
                        subject_id: subject.id.clone(),
                        class_id: class_id.clone(),
                    });
                }
            }
        }

        let has_lunch_periods = periods.iter().any(|p| p.lunch);

        Self {
            days,
            periods,
            grades,
            subjects,
            day_index,
            period_index,
            grade_index,
            subject_index,
            class_lookup,
            day_priority,
            period_priority,
            grade_order,
            fixed_slots: week.fixed_slots.clone(),
            has_lunch_periods,
            grid,
            remaining,
            options,
        }
    }

    /// Day visitation order for this walk (tie groups re-shuffled).
    pub fn day_order<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        resolve_order(&self.day_priority, &self.day_index, rng)
    }

    /// Fully randomized day order.
    pub fn day_order_shuffled<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        resolve_order_shuffled(&self.day_priority, &self.day_index, rng)
    }

    /// Period visitation order for this walk (tie groups re-shuffled).
    pub fn period_order<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        resolve_order(&self.period_priority, &self.period_index, rng)
    }

    /// Fully randomized period order.
    pub fn period_order_shuffled<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        resolve_order_shuffled(&self.period_priority, &self.period_index, rng)
    }

    /// Grade visitation order, resolved once at construction.
    pub fn grade_order(&self) -> &[usize] {
        &self.grade_order
    }

    /// The period at the tail of the period priority queue, if that tail
    /// is a single entry. Random and adjacency placement keep this period
    /// free so lunch stamping has somewhere to land.
    pub fn lowest_priority_period(&self) -> Option<usize> {
        match self.period_priority.last()? {
            PriorityEntry::Fixed(id) => self.period_index.get(id).copied(),
            PriorityEntry::TieGroup(_) => None,
        }
    }

    /// The class record for an id.
    pub fn class(&self, class_id: &str) -> Option<&ClassRef> {
        self.class_lookup.get(class_id)
    }

    /// Whether a triple is still pending.
    pub fn is_remaining(&self, grade_id: &str, subject_id: &str, class_id: &str) -> bool {
        self.remaining.contains(&PendingAssignment {
            grade_id: grade_id.into(),
            subject_id: subject_id.into(),
            class_id: class_id.into(),
        })
    }

    /// Writes a class into a cell and retires its triple.
    ///
    /// The caller must have checked legality; placement is write-once
    /// outside the articulation backtrack.
    pub fn place(
        &mut self,
        class_id: &str,
        day: usize,
        period: usize,
        subject: usize,
        group: Option<&str>,
    ) {
        let Some(class) = self.class_lookup.get(class_id) else {
            return;
        };
        let grade_id = class.grade_id.clone();
        let color = self
            .grade_index
            .get(&grade_id)
            .map(|&g| self.grades[g].color.clone())
            .unwrap_or_default();
        let subject_id = self.subjects[subject].id.clone();

        self.grid.set(
            day,
            period,
            subject,
            Cell::Class(ClassCell {
                class_id: class_id.into(),
                color,
                group: group.map(String::from),
            }),
        );
        self.remaining.remove(&PendingAssignment {
            grade_id,
            subject_id,
            class_id: class_id.into(),
        });
    }

    /// Clears a placed cell and restores its triple to the remaining set.
    ///
    /// Only the articulation backtrack uses this.
    pub fn remove(&mut self, class_id: &str, day: usize, period: usize, subject: usize) {
        let Some(class) = self.class_lookup.get(class_id) else {
            return;
        };
        self.remaining.insert(PendingAssignment {
            grade_id: class.grade_id.clone(),
            subject_id: self.subjects[subject].id.clone(),
            class_id: class_id.into(),
        });
        self.grid.clear(day, period, subject);
    }

    /// The still-pending triples, in a stable sorted order.
    ///
    /// Sorted so that a seeded run shuffles a deterministic input.
    pub fn remaining_list(&self) -> Vec<PendingAssignment> {
        let mut list: Vec<PendingAssignment> = self.remaining.iter().cloned().collect();
        list.sort();
        list
    }

    /// Number of pending triples.
    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    /// Consumes the context, yielding the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

fn build_index(ids: impl Iterator<Item = String>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id, i)).collect()
}

/// Filters a priority queue against the known ids; an empty result falls
/// back to natural record order.
fn effective_priority<T>(
    entries: &[PriorityEntry],
    index: &HashMap<String, usize>,
    records: &[T],
    id_of: impl Fn(&T) -> &String,
) -> Vec<PriorityEntry> {
    let filtered = filter_entries(entries, index);
    if !filtered.is_empty() {
        return filtered;
    }
    records
        .iter()
        .map(|r| PriorityEntry::Fixed(id_of(r).clone()))
        .collect()
}
