//! Period (time-slot row) model.

use serde::{Deserialize, Serialize};

/// A daily period.
///
/// Periods are fixed schedule metadata supplied by the surrounding
/// application. Position in [`WeekShape::periods`] is the period's grid
/// index. A period may be flagged as a lunch wave, in which case the
/// grades *not* assigned to that wave are listed in `block_grade_ids`
/// and can never be scheduled there.
///
/// [`WeekShape::periods`]: crate::models::WeekShape::periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Period identifier (e.g. "PER 1").
    pub id: String,
    /// Display time range (e.g. "8:10 - 8:55"). Presentation only.
    pub time_range: String,
    /// Whether this period is a lunch wave.
    #[serde(default)]
    pub lunch: bool,
    /// Optional header label shown above the row (e.g. "RECESS 9:45 - 10:00").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Grades that can never be scheduled in this period.
    #[serde(default)]
    pub block_grade_ids: Vec<String>,
    /// Whether this period may begin a two-period articulation block.
    /// The last period of the day is typically flagged, since the block
    /// would run past the end of the schedule.
    #[serde(default)]
    pub do_not_start_artic: bool,
}

impl Period {
    /// Creates a new period.
    pub fn new(id: impl Into<String>, time_range: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time_range: time_range.into(),
            lunch: false,
            header: None,
            block_grade_ids: Vec::new(),
            do_not_start_artic: false,
        }
    }

    /// Flags this period as a lunch wave.
    pub fn with_lunch(mut self) -> Self {
        self.lunch = true;
        self
    }

    /// Sets the header label.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the grades blocked from this period.
    pub fn with_blocked_grades(mut self, grade_ids: Vec<String>) -> Self {
        self.block_grade_ids = grade_ids;
        self
    }

    /// Disallows starting an articulation block in this period.
    pub fn without_artic_start(mut self) -> Self {
        self.do_not_start_artic = true;
        self
    }

    /// Whether a grade is blocked from this period entirely.
    #[inline]
    pub fn blocks_grade(&self, grade_id: &str) -> bool {
        self.block_grade_ids.iter().any(|g| g == grade_id)
    }
}
