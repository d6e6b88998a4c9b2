//! Day-of-week model.

use serde::{Deserialize, Serialize};

/// A school day.
///
/// The set of days is fixed for a run. Position in [`WeekShape::days`]
/// becomes the day's grid index and is stable for the run's lifetime;
/// visitation order during placement comes from the day priority queue,
/// not from this position.
///
/// [`WeekShape::days`]: crate::models::WeekShape::days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day identifier (e.g. "M".."F").
    pub id: String,
    /// Display name (e.g. "Mon").
    pub name: String,
}

impl Day {
    /// Creates a new day.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
