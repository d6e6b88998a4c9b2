//! The result grid.
//!
//! A 3-dimensional array indexed by `[day][period][subject]`. A cell is
//! either empty (`None`), a permanent blocking marker pre-seeded from a
//! subject's blocked times, a fixed marker (lunch, early release, events),
//! or a class assignment.
//!
//! The renderer consumes this grid directly: [`Cell::label`] and
//! [`Cell::color`] are what it prints and paints, [`Cell::is_full_width`]
//! marks cells it merges across the row label, and a shared `group` tag on
//! adjacent same-column cells means "visually merge, annotate once".

use serde::{Deserialize, Serialize};

/// A class assignment written into the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCell {
    /// Assigned class identifier.
    pub class_id: String,
    /// Display color, copied from the owning grade.
    pub color: String,
    /// Synchronized-meeting tag. Cells of the same meeting share the
    /// same string so renderers can merge them. No effect on legality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A non-empty grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Permanently out-of-facility: the subject is unavailable here.
    Blocked,
    /// The subject's lunch break.
    Lunch,
    /// Early-release row (school ends before this period).
    EarlyRelease,
    /// All-school events row.
    Events,
    /// A placed class.
    Class(ClassCell),
}

impl Cell {
    /// Display text for the cell.
    pub fn label(&self) -> &str {
        match self {
            Cell::Blocked => "",
            Cell::Lunch => "LUNCH",
            Cell::EarlyRelease => "EARLY RELEASE",
            Cell::Events => "EVENTS",
            Cell::Class(c) => &c.class_id,
        }
    }

    /// Display color for the cell.
    pub fn color(&self) -> &str {
        match self {
            Cell::Blocked | Cell::Lunch => "#aaa",
            Cell::EarlyRelease | Cell::Events => "#ddd",
            Cell::Class(c) => &c.color,
        }
    }

    /// Whether the renderer should merge this cell across the full row.
    pub fn is_full_width(&self) -> bool {
        !matches!(self, Cell::Class(_))
    }

    /// Meeting/merge tag, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Cell::EarlyRelease => Some("EARLY_RELEASE"),
            Cell::Events => Some("EVENTS"),
            Cell::Class(c) => c.group.as_deref(),
            _ => None,
        }
    }

    /// The assigned class id, for class cells.
    pub fn class_id(&self) -> Option<&str> {
        match self {
            Cell::Class(c) => Some(&c.class_id),
            _ => None,
        }
    }
}

/// The day × period × subject grid.
///
/// Owned exclusively by one in-flight layout run and rebuilt from scratch
/// on every generate invocation. Placement is write-once except for the
/// explicit remove-then-reassign inside the articulation backtrack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    days: usize,
    periods: usize,
    subjects: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    /// Creates an empty grid with the given dimensions.
    pub fn new(days: usize, periods: usize, subjects: usize) -> Self {
        Self {
            days,
            periods,
            subjects,
            cells: vec![None; days * periods * subjects],
        }
    }

    #[inline]
    fn offset(&self, day: usize, period: usize, subject: usize) -> usize {
        debug_assert!(day < self.days && period < self.periods && subject < self.subjects);
        (day * self.periods + period) * self.subjects + subject
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.days
    }

    /// Number of periods.
    pub fn period_count(&self) -> usize {
        self.periods
    }

    /// Number of subject columns.
    pub fn subject_count(&self) -> usize {
        self.subjects
    }

    /// The cell at the given coordinates, `None` if empty.
    #[inline]
    pub fn get(&self, day: usize, period: usize, subject: usize) -> Option<&Cell> {
        self.cells[self.offset(day, period, subject)].as_ref()
    }

    /// Whether the cell is empty.
    #[inline]
    pub fn is_empty(&self, day: usize, period: usize, subject: usize) -> bool {
        self.cells[self.offset(day, period, subject)].is_none()
    }

    /// Writes a cell.
    pub fn set(&mut self, day: usize, period: usize, subject: usize, cell: Cell) {
        let idx = self.offset(day, period, subject);
        self.cells[idx] = Some(cell);
    }

    /// Clears a cell back to empty.
    pub fn clear(&mut self, day: usize, period: usize, subject: usize) {
        let idx = self.offset(day, period, subject);
        self.cells[idx] = None;
    }

    /// Iterates the subject columns of one (day, period) row.
    pub fn row(&self, day: usize, period: usize) -> impl Iterator<Item = Option<&Cell>> {
        let start = self.offset(day, period, 0);
        self.cells[start..start + self.subjects]
            .iter()
            .map(|c| c.as_ref())
    }

    /// Number of empty cells in the whole grid.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}
