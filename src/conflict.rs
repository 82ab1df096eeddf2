//! Conflict index: per-cell occupancy tracking.
//!
//! Answers "is faculty F / room R / batch B free at (day, slot)?" in
//! O(1) and commits or releases reservations in O(1). Three mappings,
//! one per dimension, each keyed by cell to the set of occupying
//! identifiers.
//!
//! No persistence: rebuilt fresh at the start of every generation run,
//! and loaded from the live timetable at the start of every
//! substitution run.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Day, Timetable};

/// Contract violation: `reserve` on an occupied cell.
///
/// Callers are expected to check `is_free` first; this error surfacing
/// means a caller skipped that check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{dimension} '{occupant}' already reserves {day} at minute {start_min}")]
pub struct ConflictError {
    /// Cell day.
    pub day: Day,
    /// Cell start minute.
    pub start_min: u16,
    /// Which dimension collided: "faculty", "room", or "batch".
    pub dimension: &'static str,
    /// The identifier already holding the cell.
    pub occupant: String,
}

/// Per-cell occupancy of faculty, rooms, and batches.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    faculty: HashMap<(Day, u16), HashSet<String>>,
    rooms: HashMap<(Day, u16), HashSet<String>>,
    batches: HashMap<(Day, u16), HashSet<String>>,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from a live timetable.
    ///
    /// Spans both cells of lab assignments. Unscheduled placeholders
    /// (no faculty and no room binding) occupy nothing and are skipped;
    /// conflict-flagged but bound assignments (e.g. unfilled
    /// substitutions) still occupy their cells.
    pub fn from_timetable(timetable: &Timetable, slot_len_min: u16) -> Self {
        let mut index = Self::new();
        for a in &timetable.assignments {
            if a.faculty_id.is_none() && a.room_id.is_none() {
                continue;
            }
            for start in a.cell_starts(slot_len_min) {
                let cell = (a.day, start);
                if let Some(f) = &a.faculty_id {
                    index.faculty.entry(cell).or_default().insert(f.clone());
                }
                if let Some(r) = &a.room_id {
                    index.rooms.entry(cell).or_default().insert(r.clone());
                }
                index
                    .batches
                    .entry(cell)
                    .or_default()
                    .insert(a.batch_id.clone());
            }
        }
        index
    }

    /// Whether a faculty member is free at a cell.
    pub fn faculty_free(&self, day: Day, start_min: u16, faculty_id: &str) -> bool {
        !self
            .faculty
            .get(&(day, start_min))
            .is_some_and(|set| set.contains(faculty_id))
    }

    /// Whether a room is free at a cell.
    pub fn room_free(&self, day: Day, start_min: u16, room_id: &str) -> bool {
        !self
            .rooms
            .get(&(day, start_min))
            .is_some_and(|set| set.contains(room_id))
    }

    /// Whether a batch is free at a cell.
    pub fn batch_free(&self, day: Day, start_min: u16, batch_id: &str) -> bool {
        !self
            .batches
            .get(&(day, start_min))
            .is_some_and(|set| set.contains(batch_id))
    }

    /// Whether none of the supplied identifiers reserve the cell.
    pub fn is_free(
        &self,
        day: Day,
        start_min: u16,
        faculty_id: Option<&str>,
        room_id: Option<&str>,
        batch_id: Option<&str>,
    ) -> bool {
        faculty_id.is_none_or(|f| self.faculty_free(day, start_min, f))
            && room_id.is_none_or(|r| self.room_free(day, start_min, r))
            && batch_id.is_none_or(|b| self.batch_free(day, start_min, b))
    }

    /// Commits a reservation for the supplied identifiers.
    ///
    /// Defensive: fails if any identifier already holds the cell, and
    /// commits nothing in that case.
    pub fn reserve(
        &mut self,
        day: Day,
        start_min: u16,
        faculty_id: Option<&str>,
        room_id: Option<&str>,
        batch_id: Option<&str>,
    ) -> Result<(), ConflictError> {
        let cell = (day, start_min);
        if let Some(f) = faculty_id {
            if !self.faculty_free(day, start_min, f) {
                return Err(ConflictError {
                    day,
                    start_min,
                    dimension: "faculty",
                    occupant: f.to_string(),
                });
            }
        }
        if let Some(r) = room_id {
            if !self.room_free(day, start_min, r) {
                return Err(ConflictError {
                    day,
                    start_min,
                    dimension: "room",
                    occupant: r.to_string(),
                });
            }
        }
        if let Some(b) = batch_id {
            if !self.batch_free(day, start_min, b) {
                return Err(ConflictError {
                    day,
                    start_min,
                    dimension: "batch",
                    occupant: b.to_string(),
                });
            }
        }

        if let Some(f) = faculty_id {
            self.faculty.entry(cell).or_default().insert(f.to_string());
        }
        if let Some(r) = room_id {
            self.rooms.entry(cell).or_default().insert(r.to_string());
        }
        if let Some(b) = batch_id {
            self.batches.entry(cell).or_default().insert(b.to_string());
        }
        Ok(())
    }

    /// Releases a reservation for the supplied identifiers.
    ///
    /// Releasing an identifier that holds nothing is a no-op.
    pub fn release(
        &mut self,
        day: Day,
        start_min: u16,
        faculty_id: Option<&str>,
        room_id: Option<&str>,
        batch_id: Option<&str>,
    ) {
        let cell = (day, start_min);
        if let Some(f) = faculty_id {
            if let Some(set) = self.faculty.get_mut(&cell) {
                set.remove(f);
            }
        }
        if let Some(r) = room_id {
            if let Some(set) = self.rooms.get_mut(&cell) {
                set.remove(r);
            }
        }
        if let Some(b) = batch_id {
            if let Some(set) = self.batches.get_mut(&cell) {
                set.remove(b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    #[test]
    fn test_reserve_and_query() {
        let mut idx = ConflictIndex::new();
        idx.reserve(Day::Mon, 540, Some("f1"), Some("r1"), Some("b1"))
            .unwrap();

        assert!(!idx.faculty_free(Day::Mon, 540, "f1"));
        assert!(!idx.room_free(Day::Mon, 540, "r1"));
        assert!(!idx.batch_free(Day::Mon, 540, "b1"));
        // Other identifiers and other cells stay free.
        assert!(idx.faculty_free(Day::Mon, 540, "f2"));
        assert!(idx.faculty_free(Day::Mon, 600, "f1"));
        assert!(idx.faculty_free(Day::Tue, 540, "f1"));
    }

    #[test]
    fn test_is_free_combined() {
        let mut idx = ConflictIndex::new();
        idx.reserve(Day::Mon, 540, Some("f1"), Some("r1"), Some("b1"))
            .unwrap();

        assert!(idx.is_free(Day::Mon, 540, Some("f2"), Some("r2"), Some("b2")));
        // One occupied dimension poisons the whole check.
        assert!(!idx.is_free(Day::Mon, 540, Some("f2"), Some("r1"), Some("b2")));
        assert!(idx.is_free(Day::Mon, 540, None, None, Some("b2")));
    }

    #[test]
    fn test_reserve_occupied_fails_and_commits_nothing() {
        let mut idx = ConflictIndex::new();
        idx.reserve(Day::Mon, 540, Some("f1"), Some("r1"), Some("b1"))
            .unwrap();

        let err = idx
            .reserve(Day::Mon, 540, Some("f2"), Some("r1"), Some("b2"))
            .unwrap_err();
        assert_eq!(err.dimension, "room");
        assert_eq!(err.occupant, "r1");
        // The failed call must not have leaked partial reservations.
        assert!(idx.faculty_free(Day::Mon, 540, "f2"));
        assert!(idx.batch_free(Day::Mon, 540, "b2"));
    }

    #[test]
    fn test_release_then_rereserve() {
        let mut idx = ConflictIndex::new();
        idx.reserve(Day::Mon, 540, Some("f1"), None, None).unwrap();
        idx.release(Day::Mon, 540, Some("f1"), None, None);
        assert!(idx.faculty_free(Day::Mon, 540, "f1"));
        idx.reserve(Day::Mon, 540, Some("f2"), None, None).unwrap();
        assert!(!idx.faculty_free(Day::Mon, 540, "f2"));
    }

    #[test]
    fn test_from_timetable_spans_labs_and_skips_placeholders() {
        let mut t = Timetable::new();
        t.add(
            Assignment::new(Day::Mon, 600, "CS351", "CSE-3A")
                .with_faculty("f1")
                .with_room("LAB-2")
                .with_duration(2),
        );
        t.add(Assignment::new(Day::Mon, 540, "MA201", "CSE-3B").unscheduled());

        let idx = ConflictIndex::from_timetable(&t, 60);
        // Lab occupies both cells.
        assert!(!idx.faculty_free(Day::Mon, 600, "f1"));
        assert!(!idx.faculty_free(Day::Mon, 660, "f1"));
        assert!(!idx.room_free(Day::Mon, 660, "LAB-2"));
        assert!(!idx.batch_free(Day::Mon, 660, "CSE-3A"));
        // Placeholder occupies nothing.
        assert!(idx.batch_free(Day::Mon, 540, "CSE-3B"));
    }

    #[test]
    fn test_from_timetable_keeps_bound_conflict_assignments() {
        // An unfilled substitution stays bound to the absent faculty and
        // still occupies its cell.
        let mut t = Timetable::new();
        let mut a = Assignment::new(Day::Mon, 540, "CS301", "CSE-3A")
            .with_faculty("absent@univ.edu")
            .with_room("B-204");
        a.conflict = true;
        t.add(a);

        let idx = ConflictIndex::from_timetable(&t, 60);
        assert!(!idx.faculty_free(Day::Mon, 540, "absent@univ.edu"));
        assert!(!idx.room_free(Day::Mon, 540, "B-204"));
    }
}
