//! Subject model.
//!
//! A subject is one course taught to a batch: it declares how many
//! weekly hours it needs and whether those hours are theory periods
//! (single slots) or lab sessions (contiguous double slots).

use serde::{Deserialize, Serialize};

use super::Batch;

/// A course offered by a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject code (e.g. "CS301").
    pub code: String,
    /// Human-readable title.
    pub name: String,
    /// Owning department (matched against batches and faculty).
    pub department: String,
    /// Academic year the subject belongs to.
    pub year: u8,
    /// Semester within the year.
    pub semester: u8,
    /// Credit count.
    pub credits: u8,
    /// Required teaching hours per week.
    pub weekly_hours: u8,
    /// Theory or lab.
    pub kind: SubjectKind,
}

/// Classification of a subject's teaching format.
///
/// Determines slot consumption: theory hours are placed one slot at a
/// time, lab hours in contiguous pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// Classroom lecture; one slot per occurrence.
    Theory,
    /// Practical session; two consecutive slots per occurrence.
    Lab,
}

impl Subject {
    /// Creates a new subject of the given kind.
    pub fn new(code: impl Into<String>, kind: SubjectKind) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            department: String::new(),
            year: 1,
            semester: 1,
            credits: 0,
            weekly_hours: 0,
            kind,
        }
    }

    /// Creates a theory subject.
    pub fn theory(code: impl Into<String>) -> Self {
        Self::new(code, SubjectKind::Theory)
    }

    /// Creates a lab subject.
    pub fn lab(code: impl Into<String>) -> Self {
        Self::new(code, SubjectKind::Lab)
    }

    /// Sets the title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the (year, semester) cohort this subject is taught to.
    pub fn with_cohort(mut self, year: u8, semester: u8) -> Self {
        self.year = year;
        self.semester = semester;
        self
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: u8) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the required weekly teaching hours.
    pub fn with_weekly_hours(mut self, hours: u8) -> Self {
        self.weekly_hours = hours;
        self
    }

    /// Number of weekly placements the allocator must make.
    ///
    /// Theory: one per weekly hour. Lab: hours are consumed in double
    /// slots, so `weekly_hours / 2` rounded up.
    pub fn occurrences(&self) -> u8 {
        match self.kind {
            SubjectKind::Theory => self.weekly_hours,
            SubjectKind::Lab => self.weekly_hours.div_ceil(2),
        }
    }

    /// Slots consumed by a single occurrence (1 for theory, 2 for lab).
    pub fn slots_per_occurrence(&self) -> u8 {
        match self.kind {
            SubjectKind::Theory => 1,
            SubjectKind::Lab => 2,
        }
    }

    /// Whether this subject is part of a batch's semester plan.
    pub fn matches(&self, batch: &Batch) -> bool {
        self.department == batch.department
            && self.year == batch.year
            && self.semester == batch.semester
    }
}
