//! Weekly specials timetable generation for elementary schools.
//!
//! Builds a day × period grid of specials subject columns (music, PE,
//! art, ...) and fills it with class assignments: every class of every
//! grade visits every subject exactly once per week, subject teachers
//! keep an open lunch slot each day, and grades get synchronized
//! meeting blocks where all of their classes are in specials at once.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Day`, `Period`, `Grade`, `Subject`,
//!   `WeekShape`, `Configuration`, the grid cells
//! - **`validation`**: Input integrity checks (duplicate IDs, blank IDs,
//!   roster caps)
//! - **`layout`**: The placement engine — legality predicate, meeting
//!   permutation search, randomized fill, lunch and fixed-slot stamps
//!
//! # Usage
//!
//! Build a [`Configuration`](models::Configuration) and a
//! [`WeekShape`](models::WeekShape), then call [`generate`] (one
//! attempt) or [`generate_with_retries`] (keep the first complete
//! grid). Placement is randomized; a seed on [`LayoutOptions`] makes a
//! run reproducible.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod layout;
pub mod models;
pub mod validation;

pub use layout::{generate, generate_with_retries, LayoutOptions, LayoutResult};
