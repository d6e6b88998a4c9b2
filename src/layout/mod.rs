//! The placement engine.
//!
//! One generate run builds a fresh [`LayoutContext`] from the validated
//! configuration, then runs the phases in order:
//!
//! 1. Fixed-slot stamps (early release, events rows)
//! 2. Articulation meetings (two consecutive periods per grade)
//! 3. Team meetings (one period per grade)
//! 4. Remaining-assignment fill (seeded random + adjacency + sweep)
//! 5. Lunch marking
//!
//! Recoverable failures — an unsatisfiable meeting, a triple with no
//! legal cell — accumulate on the [`LayoutResult`]; nothing is thrown
//! across phase boundaries. [`generate_with_retries`] wraps the whole
//! run and keeps the first attempt with zero unsatisfied placements.

pub mod context;
pub mod fill;
pub mod legality;
pub mod meetings;
pub mod priority;
pub mod stamps;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Configuration, Grid, WeekShape};
use crate::validation::{validate, ValidationError};

pub use context::{LayoutContext, PendingAssignment};
pub use legality::can_place;

/// Tuning knobs for one layout run.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Seed for the run's random source. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Random seed placements planted per grade before the adjacency
    /// pass takes over.
    pub max_seeds_per_grade: usize,
    /// Whether every placement must leave the subject an open lunch cell
    /// elsewhere in the day. Vacuous when no period is a lunch wave.
    pub require_open_lunch: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_seeds_per_grade: 5,
            require_open_lunch: true,
        }
    }
}

impl LayoutOptions {
    /// Sets an explicit seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the per-grade seed placement cap.
    pub fn with_max_seeds_per_grade(mut self, max: usize) -> Self {
        self.max_seeds_per_grade = max;
        self
    }

    /// Disables the open-lunch legality rule.
    pub fn without_open_lunch_rule(mut self) -> Self {
        self.require_open_lunch = false;
        self
    }
}

/// Which synchronized meeting a grade was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetingKind {
    /// One shared period per week.
    Team,
    /// Two consecutive shared periods per week.
    Articulation,
}

impl MeetingKind {
    /// Lowercase label for messages.
    pub fn label(&self) -> &'static str {
        match self {
            MeetingKind::Team => "team",
            MeetingKind::Articulation => "articulation",
        }
    }
}

/// A grade whose meeting could not be placed. Recoverable: the grade's
/// classes still compete for slots in the fill phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFailure {
    /// The grade that found no legal meeting block.
    pub grade_id: String,
    /// The meeting kind that failed.
    pub kind: MeetingKind,
}

/// The output of one layout run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// The completed (possibly partial) grid.
    pub grid: Grid,
    /// Triples no phase could place. Empty means a full layout.
    pub unplaced: Vec<PendingAssignment>,
    /// Grades whose meeting search failed.
    pub meeting_failures: Vec<MeetingFailure>,
}

impl LayoutResult {
    /// Whether every tracked triple was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Human-readable warnings for the caller to display, covering both
    /// unsatisfied placements and failed meetings.
    pub fn warning_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for f in &self.meeting_failures {
            messages.push(format!(
                "Could not find a grade-level {} meeting for grade {}",
                f.kind.label(),
                f.grade_id
            ));
        }
        for u in &self.unplaced {
            messages.push(format!(
                "{} had no remaining slots for class {} (grade {})",
                u.subject_id, u.class_id, u.grade_id
            ));
        }
        messages
    }
}

/// Validates and lays out one schedule.
///
/// Returns `Err` with the validation error list if the configuration is
/// structurally invalid; layout does not run in that case. Recoverable
/// placement failures are reported on the `Ok` result, not as errors.
pub fn generate(
    config: &Configuration,
    week: &WeekShape,
    options: &LayoutOptions,
) -> Result<LayoutResult, Vec<ValidationError>> {
    validate(config, week)?;
    let mut rng = make_rng(options.seed);
    Ok(run_attempt(config, week, options, &mut rng))
}

/// Runs the layout up to `attempts` times, keeping the first complete
/// result. The final attempt's result is accepted as-is, unsatisfied
/// placements and all, so a partial grid is still returned.
pub fn generate_with_retries(
    config: &Configuration,
    week: &WeekShape,
    options: &LayoutOptions,
    attempts: usize,
) -> Result<LayoutResult, Vec<ValidationError>> {
    validate(config, week)?;
    let mut rng = make_rng(options.seed);
    let attempts = attempts.max(1);

    let mut attempt = 1;
    loop {
        let result = run_attempt(config, week, options, &mut rng);
        if result.is_complete() || attempt == attempts {
            return Ok(result);
        }
        debug!(
            "attempt {attempt}/{attempts} left {} placements unsatisfied; retrying",
            result.unplaced.len()
        );
        attempt += 1;
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// One full pass over all phases. The context is built fresh and
/// discarded; only the grid and the leftover triples survive.
fn run_attempt<R: Rng>(
    config: &Configuration,
    week: &WeekShape,
    options: &LayoutOptions,
    rng: &mut R,
) -> LayoutResult {
    let mut ctx = LayoutContext::new(config, week, options.clone(), rng);
    let mut meeting_failures = Vec::new();

    stamps::apply_fixed_slots(&mut ctx);
    meetings::create_artic_meetings(&mut ctx, rng, &mut meeting_failures);
    meetings::create_team_meetings(&mut ctx, rng, &mut meeting_failures);
    fill::fill_remaining(&mut ctx, rng);
    stamps::mark_lunch(&mut ctx, rng);

    let unplaced = ctx.remaining_list();
    for u in &unplaced {
        log::warn!(
            "{} had no remaining slots for class {} (grade {})",
            u.subject_id,
            u.class_id,
            u.grade_id
        );
    }

    LayoutResult {
        grid: ctx.into_grid(),
        unplaced,
        meeting_failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, Day, Grade, Period, Subject};
    use std::collections::HashSet;

    // Five days, six periods with one lunch wave blocked for grade A.
    fn standard_week() -> WeekShape {
        let days = vec![
            Day::new("M", "Mon"),
            Day::new("T", "Tues"),
            Day::new("W", "Wed"),
            Day::new("R", "Thurs"),
            Day::new("F", "Fri"),
        ];
        let periods = vec![
            Period::new("PER 1", "8:10 - 8:55"),
            Period::new("PER 2", "9:00 - 9:45"),
            Period::new("PER 3", "10:05 - 10:50"),
            Period::new("PER 4", "10:55 - 11:40")
                .with_lunch()
                .with_blocked_grades(vec!["A".into()]),
            Period::new("PER 5", "12:30 - 1:15"),
            Period::new("PER 6", "1:20 - 2:05").without_artic_start(),
        ];
        WeekShape::new(days, periods)
    }

    fn standard_config() -> Configuration {
        Configuration::new(
            vec![
                Grade::new("A", "#E06666").with_classes(vec!["c1".into(), "c2".into()]),
                Grade::new("B", "#FFD966").with_class("c3"),
            ],
            vec![Subject::new("S1"), Subject::new("S2"), Subject::new("S3")],
        )
    }

    fn seeded(seed: u64) -> LayoutOptions {
        LayoutOptions::default().with_seed(seed)
    }

    /// Collects (subject_id, class_id) pairs assigned anywhere in the grid.
    fn placed_pairs(result: &LayoutResult, subjects: &[Subject]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for day in 0..result.grid.day_count() {
            for period in 0..result.grid.period_count() {
                for (s, subject) in subjects.iter().enumerate() {
                    if let Some(class_id) =
                        result.grid.get(day, period, s).and_then(|c| c.class_id())
                    {
                        pairs.push((subject.id.clone(), class_id.to_string()));
                    }
                }
            }
        }
        pairs
    }

    #[test]
    fn test_generate_standard_scenario() {
        let config = standard_config();
        let week = standard_week();
        let result = generate(&config, &week, &seeded(1)).unwrap();

        // Every triple of this roomy schedule gets placed
        assert!(result.is_complete(), "unplaced: {:?}", result.unplaced);

        // Grade A got a synchronized meeting: a tagged block of two
        // adjacent columns in one (day, period)
        let mut found_block = false;
        for day in 0..5 {
            for period in 0..6 {
                let tagged: Vec<usize> = (0..3)
                    .filter(|&s| {
                        result
                            .grid
                            .get(day, period, s)
                            .and_then(|c| c.group())
                            .is_some_and(|g| g.starts_with("Grade A"))
                    })
                    .collect();
                if !tagged.is_empty() {
                    assert_eq!(tagged.len(), 2);
                    assert_eq!(tagged[1], tagged[0] + 1);
                    found_block = true;
                }
            }
        }
        assert!(found_block);

        // Grade B has one class: no group tag ever
        for day in 0..5 {
            for period in 0..6 {
                for s in 0..3 {
                    if let Some(cell) = result.grid.get(day, period, s) {
                        if cell.class_id() == Some("c3") {
                            assert_eq!(cell.group(), None);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_placed_xor_unplaced_accounting() {
        let config = standard_config();
        let week = standard_week();
        let result = generate(&config, &week, &seeded(2)).unwrap();

        let placed = placed_pairs(&result, &config.subjects);
        let placed_set: HashSet<_> = placed.iter().cloned().collect();
        assert_eq!(placed.len(), placed_set.len(), "no pair placed twice");

        let unplaced_set: HashSet<(String, String)> = result
            .unplaced
            .iter()
            .map(|u| (u.subject_id.clone(), u.class_id.clone()))
            .collect();

        // Every tracked triple is placed xor unplaced
        for grade in &config.grades {
            for subject in &config.subjects {
                if subject.blocks_grade(&grade.id) {
                    continue;
                }
                for class_id in &grade.class_ids {
                    let key = (subject.id.clone(), class_id.clone());
                    let in_grid = placed_set.contains(&key);
                    let in_warnings = unplaced_set.contains(&key);
                    assert!(in_grid ^ in_warnings, "triple {key:?} accounting broken");
                }
            }
        }
    }

    #[test]
    fn test_class_never_in_two_columns_at_once() {
        let config = standard_config();
        let week = standard_week();
        let result = generate(&config, &week, &seeded(3)).unwrap();

        for day in 0..5 {
            for period in 0..6 {
                let mut seen = HashSet::new();
                for s in 0..3 {
                    if let Some(class_id) =
                        result.grid.get(day, period, s).and_then(|c| c.class_id())
                    {
                        assert!(
                            seen.insert(class_id.to_string()),
                            "{class_id} twice at day {day} period {period}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_blocked_subject_day_never_assigned() {
        let mut config = standard_config();
        config.subjects[0] = Subject::new("S1").with_blocked_day("M");
        let week = standard_week();
        let result = generate(&config, &week, &seeded(4)).unwrap();

        // Monday's whole S1 column is the pre-stamped blocking marker
        for period in 0..6 {
            assert_eq!(result.grid.get(0, period, 0), Some(&Cell::Blocked));
        }
    }

    #[test]
    fn test_lunch_row_stamped_for_all_subjects() {
        let config = standard_config();
        let week = standard_week();
        let result = generate(&config, &week, &seeded(5)).unwrap();

        // One lunch wave: every (day, subject) gets its lunch there
        for day in 0..5 {
            for s in 0..3 {
                assert_eq!(result.grid.get(day, 3, s), Some(&Cell::Lunch));
            }
        }
    }

    #[test]
    fn test_fixed_slot_rules_applied() {
        let config = standard_config();
        let week = standard_week()
            .with_fixed_slot(crate::models::FixedSlotRule::early_release("W"))
            .with_fixed_slot(crate::models::FixedSlotRule::events("F"));
        let result = generate(&config, &week, &seeded(6)).unwrap();

        for s in 0..3 {
            assert_eq!(result.grid.get(2, 5, s), Some(&Cell::EarlyRelease));
            assert_eq!(result.grid.get(4, 5, s), Some(&Cell::Events));
        }
        assert!(result.is_complete());
    }

    #[test]
    fn test_validation_gates_layout() {
        let mut config = standard_config();
        config.subjects.push(Subject::new("S1")); // duplicate
        let errors = generate(&config, &standard_week(), &seeded(7)).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_retries_accept_last_partial_result() {
        // 3 classes, 1 subject, 2 usable cells: one triple can never be
        // placed, so every attempt fails and the last is returned
        let config = Configuration::new(
            vec![Grade::new("A", "#E06666")
                .with_classes(vec!["c1".into(), "c2".into(), "c3".into()])],
            vec![Subject::new("S1")],
        );
        let week = WeekShape::new(
            vec![Day::new("M", "Mon")],
            vec![
                Period::new("PER 1", "8:10 - 8:55"),
                Period::new("PER 2", "9:00 - 9:45"),
            ],
        );
        let result = generate_with_retries(&config, &week, &seeded(8), 3).unwrap();
        assert_eq!(result.unplaced.len(), 1);
        assert!(!result.is_complete());
        assert!(!result.warning_messages().is_empty());
    }

    #[test]
    fn test_retries_return_complete_result() {
        let config = standard_config();
        let week = standard_week();
        let result = generate_with_retries(&config, &week, &seeded(9), 3).unwrap();
        assert!(result.is_complete());
    }

    #[test]
    fn test_warning_messages_format() {
        let result = LayoutResult {
            grid: Grid::new(1, 1, 1),
            unplaced: vec![PendingAssignment {
                grade_id: "A".into(),
                subject_id: "S1".into(),
                class_id: "c1".into(),
            }],
            meeting_failures: vec![MeetingFailure {
                grade_id: "B".into(),
                kind: MeetingKind::Team,
            }],
        };
        let messages = result.warning_messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("team meeting for grade B"));
        assert!(messages[1].contains("S1 had no remaining slots for class c1 (grade A)"));
    }

    #[test]
    fn test_team_and_artic_both_placed_with_enough_columns() {
        // Four columns: the articulation block uses two subjects per
        // class, leaving two for a team meeting
        let config = Configuration::new(
            vec![Grade::new("A", "#E06666").with_classes(vec!["c1".into(), "c2".into()])],
            vec![
                Subject::new("S1"),
                Subject::new("S2"),
                Subject::new("S3"),
                Subject::new("S4"),
            ],
        );
        let result = generate(&config, &standard_week(), &seeded(10)).unwrap();
        assert!(result.meeting_failures.is_empty());
        assert!(result.is_complete());

        let mut saw_team = false;
        let mut saw_artic = false;
        for day in 0..5 {
            for period in 0..6 {
                for s in 0..4 {
                    match result.grid.get(day, period, s).and_then(|c| c.group()) {
                        Some("Grade A\n TEAM") => saw_team = true,
                        Some("Grade A\n ARTIC") => saw_artic = true,
                        _ => {}
                    }
                }
            }
        }
        assert!(saw_team && saw_artic);
    }
}
