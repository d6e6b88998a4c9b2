//! Grade and class models.

use serde::{Deserialize, Serialize};

/// A grade level with its roster of classes.
///
/// Grades are the unit of synchronization: meeting placement tries to
/// co-locate every class of a grade into the same (day, period). A grade
/// with one class never needs a meeting slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    /// Grade identifier (e.g. "K", "1".."6").
    pub id: String,
    /// Display color for the grade's cells. Presentation only.
    #[serde(default)]
    pub color: String,
    /// Classes belonging to this grade, in roster order.
    pub class_ids: Vec<String>,
}

impl Grade {
    /// Creates a new grade with an empty roster.
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            class_ids: Vec::new(),
        }
    }

    /// Sets the class roster.
    pub fn with_classes(mut self, class_ids: Vec<String>) -> Self {
        self.class_ids = class_ids;
        self
    }

    /// Adds a class to the roster.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_ids.push(class_id.into());
        self
    }

    /// Whether this grade needs synchronized meeting periods.
    ///
    /// Meetings are only meaningful with at least two distinct classes.
    #[inline]
    pub fn needs_meetings(&self) -> bool {
        self.class_ids.len() >= 2
    }
}

/// A class reference, derived from its owning grade's roster.
///
/// Classes are not configured separately; one class belongs to exactly
/// one grade, and the mapping is invariant for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    /// Class identifier.
    pub id: String,
    /// Owning grade identifier.
    pub grade_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_roster() {
        let g = Grade::new("K", "#E06666").with_classes(vec!["A1".into(), "A4".into()]);
        assert_eq!(g.class_ids.len(), 2);
        assert!(g.needs_meetings());
    }

    #[test]
    fn test_single_class_grade_never_meets() {
        let g = Grade::new("P", "#568ef2").with_class("P1");
        assert!(!g.needs_meetings());

        let empty = Grade::new("X", "#fff");
        assert!(!empty.needs_meetings());
    }

    #[test]
    fn test_grade_roundtrip() {
        let g = Grade::new("2", "#FF9900").with_classes(vec!["B2".into(), "B3".into()]);
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("classIds"));
        let back: Grade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
