//! Timetable (solution) model.
//!
//! A timetable is the complete weekly grid: one `Assignment` per
//! required subject occurrence per batch. Infeasible occurrences are
//! kept as conflict-flagged placeholders rather than dropped, so the
//! structure is always complete.
//!
//! # Determinism
//! The timetable carries no timestamps or generated identifiers;
//! regenerating from identical input yields a byte-identical value.

use serde::{Deserialize, Serialize};

use super::{Day, TimeSlot};

/// One placed (or unplaceable) subject occurrence.
///
/// The atomic unit of the grid. A lab assignment spans two consecutive
/// slots in the same day, room, and faculty (`duration_slots == 2`).
/// Unscheduled placeholders carry `conflict = true` and no faculty or
/// room binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Teaching day.
    pub day: Day,
    /// Start minute of the first occupied slot.
    pub start_min: u16,
    /// Subject taught.
    pub subject_code: String,
    /// Batch attending.
    pub batch_id: String,
    /// Faculty teaching; `None` on unscheduled placeholders.
    pub faculty_id: Option<String>,
    /// Room hosting; `None` on unscheduled placeholders.
    pub room_id: Option<String>,
    /// Slots spanned: 1 (theory) or 2 (lab).
    pub duration_slots: u8,
    /// Set when the occurrence could not be legally placed or repaired.
    /// A schedule-quality signal, not an error.
    pub conflict: bool,
}

impl Assignment {
    /// Creates a single-slot assignment with no bindings yet.
    pub fn new(
        day: Day,
        start_min: u16,
        subject_code: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            day,
            start_min,
            subject_code: subject_code.into(),
            batch_id: batch_id.into(),
            faculty_id: None,
            room_id: None,
            duration_slots: 1,
            conflict: false,
        }
    }

    /// Binds the teaching faculty.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Binds the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Sets the spanned slot count (2 for labs).
    pub fn with_duration(mut self, slots: u8) -> Self {
        self.duration_slots = slots;
        self
    }

    /// Marks this assignment as an unplaceable placeholder.
    pub fn unscheduled(mut self) -> Self {
        self.conflict = true;
        self
    }

    /// Whether this assignment spans a lab double slot.
    pub fn is_lab_span(&self) -> bool {
        self.duration_slots == 2
    }

    /// The first cell this assignment occupies.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.day, self.start_min)
    }

    /// Start minutes of every cell this assignment occupies, given the
    /// grid's slot length.
    pub fn cell_starts(&self, slot_len_min: u16) -> Vec<u16> {
        (0..self.duration_slots)
            .map(|i| self.start_min + u16::from(i) * slot_len_min)
            .collect()
    }
}

/// The complete weekly schedule for a department.
///
/// Assignments are kept in generation order, which is deterministic;
/// cell, batch, and faculty views are projections over that list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// All assignments, scheduled and placeholder alike.
    pub assignments: Vec<Assignment>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn add(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Assignments starting in the given cell.
    pub fn at(&self, day: Day, start_min: u16) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.day == day && a.start_min == start_min)
            .collect()
    }

    /// All assignments for a batch, in generation order.
    pub fn for_batch(&self, batch_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.batch_id == batch_id)
            .collect()
    }

    /// All assignments taught by a faculty member, including slots they
    /// hold as a substitute.
    pub fn for_faculty(&self, faculty_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.faculty_id.as_deref() == Some(faculty_id))
            .collect()
    }

    /// Assignments flagged as unplaceable or unrepaired.
    pub fn conflicts(&self) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.conflict).collect()
    }

    /// Whether every occurrence was placed cleanly.
    pub fn is_conflict_free(&self) -> bool {
        self.assignments.iter().all(|a| !a.conflict)
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the timetable holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timetable {
        let mut t = Timetable::new();
        t.add(
            Assignment::new(Day::Mon, 540, "CS301", "CSE-3A")
                .with_faculty("asha@univ.edu")
                .with_room("B-204"),
        );
        t.add(
            Assignment::new(Day::Mon, 600, "CS351", "CSE-3A")
                .with_faculty("ravi@univ.edu")
                .with_room("LAB-2")
                .with_duration(2),
        );
        t.add(Assignment::new(Day::Mon, 540, "MA201", "CSE-3B").unscheduled());
        t
    }

    #[test]
    fn test_cell_view() {
        let t = sample();
        let cell = t.at(Day::Mon, 540);
        assert_eq!(cell.len(), 2); // CSE-3A scheduled + CSE-3B placeholder
        assert!(t.at(Day::Tue, 540).is_empty());
    }

    #[test]
    fn test_batch_and_faculty_views() {
        let t = sample();
        assert_eq!(t.for_batch("CSE-3A").len(), 2);
        assert_eq!(t.for_faculty("ravi@univ.edu").len(), 1);
        // Placeholder has no faculty binding and must not appear.
        assert!(t.for_faculty("").is_empty());
    }

    #[test]
    fn test_conflicts_view() {
        let t = sample();
        assert!(!t.is_conflict_free());
        assert_eq!(t.conflicts().len(), 1);
        assert_eq!(t.conflicts()[0].subject_code, "MA201");
    }

    #[test]
    fn test_lab_cell_starts() {
        let a = Assignment::new(Day::Mon, 600, "CS351", "CSE-3A").with_duration(2);
        assert_eq!(a.cell_starts(60), vec![600, 660]);
        assert!(a.is_lab_span());

        let single = Assignment::new(Day::Mon, 540, "CS301", "CSE-3A");
        assert_eq!(single.cell_starts(60), vec![540]);
    }
}
