//! Configuration validation.
//!
//! Checks structural integrity of the week shape and configuration
//! before layout. Detects:
//! - Duplicate IDs (days, periods, grades, classes, subjects)
//! - Blank subject IDs
//! - Grades too large for the meeting permutation search
//!
//! Validation errors are fatal to a run: if any exist, layout must not
//! execute and the caller reports the list and stops.

use std::collections::HashSet;

use crate::models::{Configuration, WeekShape};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Largest class roster the meeting search accepts for one grade.
///
/// Meeting placement enumerates every permutation of a grade's classes,
/// which is factorial in roster size. 7 classes is 5040 permutations per
/// (day, period, offset) candidate; beyond that the search is rejected
/// up front instead of hanging the run.
pub const MAX_MEETING_CLASSES: usize = 7;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has a blank ID.
    BlankId,
    /// A grade has more classes than the meeting search can handle.
    TooManyClasses,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration against a week shape.
///
/// Checks:
/// 1. No duplicate period IDs
/// 2. No duplicate day IDs
/// 3. No duplicate grade IDs
/// 4. No duplicate class IDs (across all grades)
/// 5. No duplicate subject IDs
/// 6. No blank subject IDs
/// 7. No grade with more than [`MAX_MEETING_CLASSES`] classes
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate(config: &Configuration, week: &WeekShape) -> ValidationResult {
    let mut errors = Vec::new();

    if has_duplicates(week.periods.iter().map(|p| p.id.as_str())) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Multiple periods have the same id",
        ));
    }

    if has_duplicates(week.days.iter().map(|d| d.id.as_str())) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Multiple days have the same id",
        ));
    }

    if has_duplicates(config.grades.iter().map(|g| g.id.as_str())) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Multiple grades have the same name",
        ));
    }

    // Class ids must be unique across every grade's roster
    let mut class_ids = HashSet::new();
    for grade in &config.grades {
        for class_id in &grade.class_ids {
            if !class_ids.insert(class_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("There are multiple classes named {class_id}"),
                ));
            }
        }
    }

    if has_duplicates(config.subjects.iter().map(|s| s.id.as_str())) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Multiple subjects have the same name",
        ));
    }

    if config.subjects.iter().any(|s| s.id.is_empty()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::BlankId,
            "Subjects cannot have a blank name",
        ));
    }

    for grade in &config.grades {
        if grade.class_ids.len() > MAX_MEETING_CLASSES {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyClasses,
                format!(
                    "Grade {} has {} classes; meeting placement supports at most {}",
                    grade.id,
                    grade.class_ids.len(),
                    MAX_MEETING_CLASSES
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return true;
        }
    }
    false
}
