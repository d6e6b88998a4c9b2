//! Configuration and week-shape models.
//!
//! [`Configuration`] is the user-editable part (grades and subjects),
//! supplied by the form layer and persisted verbatim as JSON. [`WeekShape`]
//! is the fixed schedule metadata — days, periods, priority queues, and
//! fixed-slot rules — owned by the surrounding application.

use serde::{Deserialize, Serialize};

use super::{Day, Grade, Period, Subject};

/// An entry of a priority queue.
///
/// Queues decide the order in which days, periods, and grades are tried
/// during placement; they never affect legality. A tie group means
/// "resolve order uniformly at random within this subset before moving
/// to the next entry". Serialized in the mixed-array shape: a bare id or
/// a nested id array, e.g. `["T", "W", "R", ["M", "F"]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityEntry {
    /// A single id at this priority position.
    Fixed(String),
    /// Ids tried in random order at this priority position.
    TieGroup(Vec<String>),
}

/// Which period of a day a fixed-slot rule stamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodPick {
    /// The day's final period.
    LastPeriod,
    /// A specific period by id.
    Id(String),
}

/// What a fixed-slot rule stamps into the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixedCell {
    /// School ends early; the row is out of session.
    EarlyRelease,
    /// All-school events row.
    Events,
}

/// An unconditional stamp of an entire (day, period) row.
///
/// Applied before the search phases so it constrains, rather than
/// competes with, later placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedSlotRule {
    /// Day to stamp.
    pub day_id: String,
    /// Period to stamp.
    pub period: PeriodPick,
    /// Marker to write across every subject column.
    pub cell: FixedCell,
}

impl FixedSlotRule {
    /// An early-release rule on the last period of a day.
    pub fn early_release(day_id: impl Into<String>) -> Self {
        Self {
            day_id: day_id.into(),
            period: PeriodPick::LastPeriod,
            cell: FixedCell::EarlyRelease,
        }
    }

    /// An events rule on the last period of a day.
    pub fn events(day_id: impl Into<String>) -> Self {
        Self {
            day_id: day_id.into(),
            period: PeriodPick::LastPeriod,
            cell: FixedCell::Events,
        }
    }
}

/// The user-editable configuration: grades and subjects.
///
/// Round-trips through JSON verbatim; the persistence layer stores it
/// opaquely and the form layer edits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Grade levels with their class rosters.
    pub grades: Vec<Grade>,
    /// Subject columns with their exclusions.
    pub subjects: Vec<Subject>,
}

impl Configuration {
    /// Creates a configuration.
    pub fn new(grades: Vec<Grade>, subjects: Vec<Subject>) -> Self {
        Self { grades, subjects }
    }
}

/// Fixed schedule metadata for the week.
///
/// Day and period order here defines the grid coordinates; the priority
/// queues define visitation order during placement. Priority entries
/// naming unknown ids are dropped during context construction, and an
/// empty queue falls back to natural record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekShape {
    /// School days, in grid order.
    pub days: Vec<Day>,
    /// Daily periods, in grid order.
    pub periods: Vec<Period>,
    /// Day visitation order for placement.
    #[serde(default)]
    pub day_priority: Vec<PriorityEntry>,
    /// Period visitation order for placement.
    #[serde(default)]
    pub period_priority: Vec<PriorityEntry>,
    /// Grade visitation order for meeting placement.
    #[serde(default)]
    pub grade_priority: Vec<PriorityEntry>,
    /// Unconditional row stamps (early release, events).
    #[serde(default)]
    pub fixed_slots: Vec<FixedSlotRule>,
}

impl WeekShape {
    /// Creates a week shape with natural visitation order and no
    /// fixed-slot rules.
    pub fn new(days: Vec<Day>, periods: Vec<Period>) -> Self {
        Self {
            days,
            periods,
            day_priority: Vec::new(),
            period_priority: Vec::new(),
            grade_priority: Vec::new(),
            fixed_slots: Vec::new(),
        }
    }

    /// Sets the day priority queue.
    pub fn with_day_priority(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.day_priority = entries;
        self
    }

    /// Sets the period priority queue.
    pub fn with_period_priority(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.period_priority = entries;
        self
    }

    /// Sets the grade priority queue.
    pub fn with_grade_priority(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.grade_priority = entries;
        self
    }

    /// Adds a fixed-slot rule.
    pub fn with_fixed_slot(mut self, rule: FixedSlotRule) -> Self {
        self.fixed_slots.push(rule);
        self
    }

    /// Whether any period is flagged as a lunch wave.
    pub fn has_lunch_periods(&self) -> bool {
        self.periods.iter().any(|p| p.lunch)
    }
}
