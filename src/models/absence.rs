//! Absence and substitution records.
//!
//! One record exists per (date, faculty). The substitution resolver is
//! the only writer of `substitutions`; records are superseded by a new
//! record for the same key, never deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance status for one faculty member on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// A substitute bound to one affected slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Start minute of the repaired slot.
    pub start_min: u16,
    /// Faculty standing in.
    pub substitute_id: String,
}

/// Attendance record for one faculty member on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Calendar date of the absence.
    pub date: NaiveDate,
    /// The faculty member the record is about.
    pub faculty_id: String,
    /// Present or absent.
    pub status: AttendanceStatus,
    /// Substitutes found for affected slots. Slots left unfilled have
    /// no entry here; they are visible as conflict flags on the
    /// timetable instead.
    pub substitutions: Vec<Substitution>,
}

impl AbsenceRecord {
    /// Creates an absence record with no substitutions yet.
    pub fn absent(date: NaiveDate, faculty_id: impl Into<String>) -> Self {
        Self {
            date,
            faculty_id: faculty_id.into(),
            status: AttendanceStatus::Absent,
            substitutions: Vec::new(),
        }
    }

    /// Appends a substitution entry.
    pub fn record_substitution(&mut self, start_min: u16, substitute_id: impl Into<String>) {
        self.substitutions.push(Substitution {
            start_min,
            substitute_id: substitute_id.into(),
        });
    }

    /// The substitute bound to a slot, if one was found.
    pub fn substitute_for(&self, start_min: u16) -> Option<&str> {
        self.substitutions
            .iter()
            .find(|s| s.start_min == start_min)
            .map(|s| s.substitute_id.as_str())
    }
}
