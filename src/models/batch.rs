//! Batch (section) model.

use serde::{Deserialize, Serialize};

/// A fixed cohort of students sharing one semester's subject list.
///
/// A batch follows every subject matching its (department, year,
/// semester); it has no subject list of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique identifier (e.g. "CSE-3A").
    pub id: String,
    /// Owning department.
    pub department: String,
    /// Academic year.
    pub year: u8,
    /// Semester within the year.
    pub semester: u8,
    /// Number of students.
    pub size: u16,
}

impl Batch {
    /// Creates a new batch.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            department: String::new(),
            year: 1,
            semester: 1,
            size: 0,
        }
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the (year, semester) cohort.
    pub fn with_cohort(mut self, year: u8, semester: u8) -> Self {
        self.year = year;
        self.semester = semester;
        self
    }

    /// Sets the student count.
    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    /// Stable ordering key: (department, year, semester, id).
    pub fn ordering_key(&self) -> (&str, u8, u8, &str) {
        (&self.department, self.year, self.semester, &self.id)
    }
}
