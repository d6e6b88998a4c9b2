//! Timetable domain models.
//!
//! Provides the data types for the weekly specials grid: the fixed week
//! shape (days, periods, priorities), the user-editable configuration
//! (grades, subjects), and the result grid the renderer consumes.

mod config;
mod day;
mod grade;
mod grid;
mod period;
mod subject;

pub use config::{Configuration, FixedCell, FixedSlotRule, PeriodPick, PriorityEntry, WeekShape};
pub use day::Day;
pub use grade::{ClassRef, Grade};
pub use grid::{Cell, ClassCell, Grid};
pub use period::Period;
pub use subject::{BlockedTime, Subject};
