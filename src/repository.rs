//! Storage boundary.
//!
//! The engine never talks to a database directly: the surrounding
//! application supplies a `TimetableRepository`, and the engine reads
//! snapshots and publishes results through it. `save_timetable` is an
//! atomic replace of the single live timetable — readers see the
//! previous or the next complete grid, never a partial write.
//!
//! `InMemoryRepository` is the reference implementation, used by the
//! test suite and by embedders that keep records elsewhere.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::error::EngineResult;
use crate::models::{AbsenceRecord, Batch, Faculty, Room, Subject, Timetable};

/// Boundary to persisted storage.
///
/// Snapshot reads are assumed internally consistent for the duration of
/// one generation run. Absence records are keyed by (date, faculty).
pub trait TimetableRepository {
    /// Loads all subjects.
    fn load_subjects(&self) -> EngineResult<Vec<Subject>>;
    /// Loads the faculty roster.
    fn load_faculty(&self) -> EngineResult<Vec<Faculty>>;
    /// Loads all rooms.
    fn load_rooms(&self) -> EngineResult<Vec<Room>>;
    /// Loads all batches.
    fn load_batches(&self) -> EngineResult<Vec<Batch>>;

    /// Atomically replaces the live timetable.
    fn save_timetable(&self, timetable: &Timetable) -> EngineResult<()>;
    /// Loads the live timetable, if one was ever generated.
    fn load_timetable(&self) -> EngineResult<Option<Timetable>>;

    /// Upserts an absence record for its (date, faculty) key.
    fn record_absence(&self, record: &AbsenceRecord) -> EngineResult<()>;
    /// Loads the absence record for a (date, faculty) key.
    fn load_absence(
        &self,
        date: NaiveDate,
        faculty_id: &str,
    ) -> EngineResult<Option<AbsenceRecord>>;
}

#[derive(Debug, Default)]
struct Store {
    subjects: Vec<Subject>,
    faculty: Vec<Faculty>,
    rooms: Vec<Room>,
    batches: Vec<Batch>,
    timetable: Option<Timetable>,
    absences: HashMap<(NaiveDate, String), AbsenceRecord>,
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: RwLock<Store>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the subject list.
    pub fn with_subjects(self, subjects: Vec<Subject>) -> Self {
        self.inner.write().subjects = subjects;
        self
    }

    /// Seeds the faculty roster.
    pub fn with_faculty(self, faculty: Vec<Faculty>) -> Self {
        self.inner.write().faculty = faculty;
        self
    }

    /// Seeds the room list.
    pub fn with_rooms(self, rooms: Vec<Room>) -> Self {
        self.inner.write().rooms = rooms;
        self
    }

    /// Seeds the batch list.
    pub fn with_batches(self, batches: Vec<Batch>) -> Self {
        self.inner.write().batches = batches;
        self
    }
}

impl TimetableRepository for InMemoryRepository {
    fn load_subjects(&self) -> EngineResult<Vec<Subject>> {
        Ok(self.inner.read().subjects.clone())
    }

    fn load_faculty(&self) -> EngineResult<Vec<Faculty>> {
        Ok(self.inner.read().faculty.clone())
    }

    fn load_rooms(&self) -> EngineResult<Vec<Room>> {
        Ok(self.inner.read().rooms.clone())
    }

    fn load_batches(&self) -> EngineResult<Vec<Batch>> {
        Ok(self.inner.read().batches.clone())
    }

    fn save_timetable(&self, timetable: &Timetable) -> EngineResult<()> {
        self.inner.write().timetable = Some(timetable.clone());
        Ok(())
    }

    fn load_timetable(&self) -> EngineResult<Option<Timetable>> {
        Ok(self.inner.read().timetable.clone())
    }

    fn record_absence(&self, record: &AbsenceRecord) -> EngineResult<()> {
        self.inner
            .write()
            .absences
            .insert((record.date, record.faculty_id.clone()), record.clone());
        Ok(())
    }

    fn load_absence(
        &self,
        date: NaiveDate,
        faculty_id: &str,
    ) -> EngineResult<Option<AbsenceRecord>> {
        Ok(self
            .inner
            .read()
            .absences
            .get(&(date, faculty_id.to_string()))
            .cloned())
    }
}
