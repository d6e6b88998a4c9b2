//! Subject (specials column) model.
//!
//! A subject is conceptually a teacher/subject-room — the column dimension
//! of the grid. Subjects carry two kinds of exclusion: blocked times
//! (the column is unavailable, e.g. the teacher is out of the building)
//! and blocked grades (the subject is never taught to that grade at all).

use serde::{Deserialize, Serialize};

/// A time during which a subject column is entirely unavailable.
///
/// Either a whole day or a subset of a day's periods. Serialized in the
/// configuration's mixed-array shape: a bare day id string, or an object
/// `{"dayId": ..., "periodIds": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockedTime {
    /// The subject is unavailable for the entire day.
    FullDay(String),
    /// The subject is unavailable for the listed periods of the day.
    #[serde(rename_all = "camelCase")]
    PartialDay {
        /// Day identifier.
        day_id: String,
        /// Blocked period identifiers within that day.
        period_ids: Vec<String>,
    },
}

impl BlockedTime {
    /// Whether this rule blocks the given (day, period) cell.
    pub fn blocks(&self, day_id: &str, period_id: &str) -> bool {
        match self {
            BlockedTime::FullDay(day) => day == day_id,
            BlockedTime::PartialDay {
                day_id: day,
                period_ids,
            } => day == day_id && period_ids.iter().any(|p| p == period_id),
        }
    }
}

/// A subject column of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject identifier (e.g. "MUSIC", "K-2 ART").
    pub id: String,
    /// Times during which the whole column is unavailable.
    #[serde(default)]
    pub blocked_times: Vec<BlockedTime>,
    /// Grades this subject is never taught to. Triples for these grades
    /// are not tracked at all.
    #[serde(default)]
    pub block_grade_ids: Vec<String>,
}

impl Subject {
    /// Creates a new subject with no exclusions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blocked_times: Vec::new(),
            block_grade_ids: Vec::new(),
        }
    }

    /// Blocks the subject for an entire day.
    pub fn with_blocked_day(mut self, day_id: impl Into<String>) -> Self {
        self.blocked_times.push(BlockedTime::FullDay(day_id.into()));
        self
    }

    /// Blocks the subject for specific periods of a day.
    pub fn with_blocked_periods(
        mut self,
        day_id: impl Into<String>,
        period_ids: Vec<String>,
    ) -> Self {
        self.blocked_times.push(BlockedTime::PartialDay {
            day_id: day_id.into(),
            period_ids,
        });
        self
    }

    /// Excludes grades from this subject entirely.
    pub fn with_blocked_grades(mut self, grade_ids: Vec<String>) -> Self {
        self.block_grade_ids = grade_ids;
        self
    }

    /// Whether a grade is globally excluded from this subject.
    #[inline]
    pub fn blocks_grade(&self, grade_id: &str) -> bool {
        self.block_grade_ids.iter().any(|g| g == grade_id)
    }

    /// Whether the column is unavailable at the given (day, period).
    pub fn is_blocked_at(&self, day_id: &str, period_id: &str) -> bool {
        self.blocked_times.iter().any(|t| t.blocks(day_id, period_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_day_block() {
        let s = Subject::new("K-2 ART").with_blocked_day("M").with_blocked_day("F");
        assert!(s.is_blocked_at("M", "PER 1"));
        assert!(s.is_blocked_at("F", "PER 6"));
        assert!(!s.is_blocked_at("T", "PER 1"));
    }

    #[test]
    fn test_partial_day_block() {
        let s = Subject::new("3-6 ART")
            .with_blocked_periods("W", vec!["PER 1".into(), "PER 2".into()])
            .with_blocked_day("R");
        assert!(s.is_blocked_at("W", "PER 1"));
        assert!(s.is_blocked_at("W", "PER 2"));
        assert!(!s.is_blocked_at("W", "PER 3"));
        assert!(s.is_blocked_at("R", "PER 3"));
    }

    #[test]
    fn test_grade_exclusion() {
        let s = Subject::new("K-2 ART").with_blocked_grades(vec!["3".into(), "4".into()]);
        assert!(s.blocks_grade("3"));
        assert!(!s.blocks_grade("K"));
    }

    #[test]
    fn test_blocked_time_mixed_json() {
        // The configuration's mixed-array shape: bare day ids and
        // day/period objects in the same list
        let json = r#"["M", {"dayId": "W", "periodIds": ["PER 1", "PER 2"]}]"#;
        let times: Vec<BlockedTime> = serde_json::from_str(json).unwrap();
        assert_eq!(times[0], BlockedTime::FullDay("M".into()));
        assert!(times[1].blocks("W", "PER 2"));
        assert!(!times[1].blocks("W", "PER 3"));

        let back = serde_json::to_string(&times).unwrap();
        let again: Vec<BlockedTime> = serde_json::from_str(&back).unwrap();
        assert_eq!(again, times);
    }

    #[test]
    fn test_subject_deserialize_defaults() {
        let s: Subject = serde_json::from_str(r#"{"id":"MUSIC"}"#).unwrap();
        assert!(s.blocked_times.is_empty());
        assert!(s.block_grade_ids.is_empty());
    }
}
