//! Substitution resolution for faculty absences.
//!
//! Given an absence record for one date, finds every assignment the
//! absent faculty holds on that weekday and walks each through
//! `Pending -> Searching -> Assigned | Unfilled`:
//!
//! - **Searching**: scan the faculty pool in ascending id order,
//!   skipping the absentee, restricted to the absentee's department
//!   unless relaxed; the first candidate free across the assignment's
//!   full span wins.
//! - **Assigned**: release the absentee's reservation, reserve the
//!   substitute, rebind the assignment, append a substitution entry.
//! - **Unfilled**: leave the assignment bound to the absentee with
//!   `conflict = true`; nothing is recorded — the institution handles
//!   it manually.
//!
//! Slots are processed in ascending (slot, batch) order against one
//! conflict index rebuilt from the live timetable, so each decision
//! sees every earlier substitution of the same pass. Room and batch
//! bindings are never touched.

use chrono::Datelike;
use tracing::{debug, warn};

use crate::conflict::ConflictIndex;
use crate::error::EngineResult;
use crate::models::{AbsenceRecord, AttendanceStatus, Day, Faculty, Timetable};

/// Per-slot resolution outcome.
enum Resolution {
    Assigned(String),
    Unfilled,
}

/// Finds substitutes for an absent faculty member's slots.
#[derive(Debug, Clone)]
pub struct SubstitutionResolver {
    pool: Vec<Faculty>,
    slot_len_min: u16,
    same_department_only: bool,
}

impl SubstitutionResolver {
    /// Creates a resolver over the institutional faculty pool.
    ///
    /// `slot_len_min` must match the grid the timetable was generated
    /// on; lab assignments span `start + slot_len` cells.
    pub fn new(pool: Vec<Faculty>, slot_len_min: u16) -> Self {
        let mut pool = pool;
        pool.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            pool,
            slot_len_min,
            same_department_only: true,
        }
    }

    /// Widens (or narrows) the candidate pool to any department.
    ///
    /// Same-department matching is the default; institutions with
    /// cross-trained staff can relax it.
    pub fn with_same_department_only(mut self, flag: bool) -> Self {
        self.same_department_only = flag;
        self
    }

    /// Repairs the timetable for one absence and records what was done.
    ///
    /// Returns the updated pair. Slots with no free candidate keep the
    /// absentee and gain a `conflict` flag; the record only lists the
    /// substitutions that were actually made. A record dated outside
    /// the teaching week (Sunday), or marked present, changes nothing.
    ///
    /// # Errors
    /// `EngineError::Conflict` only on an internal reservation bug;
    /// unfilled slots are data, not errors.
    pub fn resolve(
        &self,
        mut timetable: Timetable,
        mut record: AbsenceRecord,
    ) -> EngineResult<(Timetable, AbsenceRecord)> {
        if record.status == AttendanceStatus::Present {
            return Ok((timetable, record));
        }
        let Some(day) = Day::from_weekday(record.date.weekday()) else {
            return Ok((timetable, record));
        };

        let mut index = ConflictIndex::from_timetable(&timetable, self.slot_len_min);
        let department = self
            .pool
            .iter()
            .find(|f| f.id == record.faculty_id)
            .map(|f| f.department.clone());

        let mut affected: Vec<usize> = timetable
            .assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| {
                a.day == day && a.faculty_id.as_deref() == Some(record.faculty_id.as_str())
            })
            .map(|(i, _)| i)
            .collect();
        affected.sort_by(|&x, &y| {
            let a = &timetable.assignments[x];
            let b = &timetable.assignments[y];
            (a.start_min, a.batch_id.as_str()).cmp(&(b.start_min, b.batch_id.as_str()))
        });

        for i in affected {
            let cells = timetable.assignments[i].cell_starts(self.slot_len_min);
            match self.search(&index, day, &cells, &record.faculty_id, department.as_deref()) {
                Resolution::Assigned(substitute) => {
                    for &s in &cells {
                        index.release(day, s, Some(&record.faculty_id), None, None);
                        index.reserve(day, s, Some(&substitute), None, None)?;
                    }
                    let assignment = &mut timetable.assignments[i];
                    debug!(
                        slot = %assignment.slot(),
                        batch = %assignment.batch_id,
                        substitute = %substitute,
                        "substitute assigned"
                    );
                    assignment.faculty_id = Some(substitute.clone());
                    record.record_substitution(assignment.start_min, substitute);
                }
                Resolution::Unfilled => {
                    let assignment = &mut timetable.assignments[i];
                    warn!(
                        slot = %assignment.slot(),
                        batch = %assignment.batch_id,
                        faculty = %record.faculty_id,
                        "no substitute available, slot left unfilled"
                    );
                    assignment.conflict = true;
                }
            }
        }

        Ok((timetable, record))
    }

    /// Scans candidates for one affected span.
    fn search(
        &self,
        index: &ConflictIndex,
        day: Day,
        cells: &[u16],
        absent_id: &str,
        department: Option<&str>,
    ) -> Resolution {
        // Department unknown (absentee not in the pool): with strict
        // matching there is no candidate set to draw from.
        if self.same_department_only && department.is_none() {
            return Resolution::Unfilled;
        }
        for f in &self.pool {
            if f.id == absent_id {
                continue;
            }
            if self.same_department_only && Some(f.department.as_str()) != department {
                continue;
            }
            if cells.iter().all(|&s| index.faculty_free(day, s, &f.id)) {
                return Resolution::Assigned(f.id.clone());
            }
        }
        Resolution::Unfilled
    }
}
