//! Engine facade: generation and substitution over a repository.
//!
//! Wires the allocator and resolver to a `TimetableRepository` and
//! enforces the concurrency contract:
//!
//! - at most one in-flight generation (regeneration replaces the whole
//!   live timetable, so concurrent runs would race on the same
//!   document);
//! - substitution runs for the same (date, faculty) are serialized via
//!   a per-key lock, so a substitute cannot be double-booked; distinct
//!   keys proceed independently;
//! - both paths publish through the repository's atomic
//!   `save_timetable` replace, so readers never observe a partial grid.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::info;

use crate::allocator::Allocator;
use crate::config::TimetableConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceRecord, Timetable};
use crate::repository::TimetableRepository;
use crate::substitution::SubstitutionResolver;

/// Timetable engine bound to a repository.
pub struct Engine<R: TimetableRepository> {
    repo: R,
    allocator: Allocator,
    generation_lock: Mutex<()>,
    absence_locks: Mutex<HashMap<(NaiveDate, String), Arc<Mutex<()>>>>,
}

impl<R: TimetableRepository> Engine<R> {
    /// Creates an engine over a repository and grid configuration.
    ///
    /// # Errors
    /// `EngineError::Validation` on invalid configuration.
    pub fn new(repo: R, config: TimetableConfig) -> EngineResult<Self> {
        Ok(Self {
            repo,
            allocator: Allocator::new(config)?,
            generation_lock: Mutex::new(()),
            absence_locks: Mutex::new(HashMap::new()),
        })
    }

    /// The repository this engine reads and writes through.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The allocator (and its enumerated grid).
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Regenerates the live timetable from the current roster snapshot.
    ///
    /// Loads the domain snapshot, allocates, and publishes the result
    /// as one atomic replace. Only one regeneration runs at a time.
    pub fn regenerate(&self) -> EngineResult<Timetable> {
        let _running = self.generation_lock.lock();

        let subjects = self.repo.load_subjects()?;
        let faculty = self.repo.load_faculty()?;
        let rooms = self.repo.load_rooms()?;
        let batches = self.repo.load_batches()?;

        let timetable = self
            .allocator
            .allocate(&subjects, &faculty, &rooms, &batches)?;
        self.repo.save_timetable(&timetable)?;
        info!(assignments = timetable.len(), "live timetable replaced");
        Ok(timetable)
    }

    /// Resolves substitutions for one faculty absence on one date.
    ///
    /// Extends the existing absence record for the key if one is
    /// stored, then repairs the live timetable and publishes both.
    /// Calls for the same (date, faculty) are serialized.
    ///
    /// # Errors
    /// `EngineError::NoTimetable` when nothing was generated yet.
    pub fn resolve_absence(
        &self,
        date: NaiveDate,
        faculty_id: &str,
    ) -> EngineResult<(Timetable, AbsenceRecord)> {
        let key_lock = {
            let mut locks = self.absence_locks.lock();
            Arc::clone(
                locks
                    .entry((date, faculty_id.to_string()))
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        let _running = key_lock.lock();

        let timetable = self
            .repo
            .load_timetable()?
            .ok_or(EngineError::NoTimetable)?;
        let record = self
            .repo
            .load_absence(date, faculty_id)?
            .unwrap_or_else(|| AbsenceRecord::absent(date, faculty_id));

        let pool = self.repo.load_faculty()?;
        let resolver =
            SubstitutionResolver::new(pool, self.allocator.calendar().slot_len_min());
        let (timetable, record) = resolver.resolve(timetable, record)?;

        self.repo.save_timetable(&timetable)?;
        self.repo.record_absence(&record)?;
        Ok((timetable, record))
    }

    /// The live timetable, if one was generated.
    pub fn timetable(&self) -> EngineResult<Option<Timetable>> {
        self.repo.load_timetable()
    }
}
