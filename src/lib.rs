//! Weekly timetable engine for academic departments.
//!
//! Assigns subjects to batches (sections) across a fixed weekly grid of
//! days and time slots, respecting faculty, room, and batch
//! availability, and repairs the schedule when faculty absences are
//! reported by binding substitutes.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Subject`, `Faculty`, `Room`, `Batch`,
//!   `Day`/`TimeSlot`, `Assignment`, `Timetable`, `AbsenceRecord`
//! - **`config`**: Grid configuration (days, bounds, slot length,
//!   breaks, daily caps)
//! - **`calendar`**: Enumeration of valid grid cells minus breaks
//! - **`conflict`**: O(1) per-cell occupancy index
//! - **`validation`**: Input integrity checks (duplicate IDs, zero
//!   hours, empty batches)
//! - **`allocator`**: Deterministic greedy placement and stats
//! - **`substitution`**: Absence repair with per-slot substitute search
//! - **`repository`**: Storage boundary trait + in-memory reference
//! - **`engine`**: Facade enforcing the generation/substitution
//!   concurrency contract
//! - **`error`**: Crate-wide error taxonomy
//!
//! # Design
//!
//! Generation is pure compute over a roster snapshot: the allocator
//! never performs I/O and never aborts on infeasibility — occurrences
//! with no legal placement are flagged `conflict = true` and the run
//! continues. Identical input produces a byte-identical timetable; all
//! tie-breaks (batch order, subject order, room/faculty choice) are
//! deterministic and documented on the allocator.

pub mod allocator;
pub mod calendar;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod substitution;
pub mod validation;
