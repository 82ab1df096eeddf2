//! Faculty model.

use serde::{Deserialize, Serialize};

/// A teaching staff member.
///
/// Owned by the institutional roster; the engine reads faculty but never
/// mutates them — substitution rebinds assignments, not people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique identifier, typically the institutional email.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Home department.
    pub department: String,
}

impl Faculty {
    /// Creates a new faculty member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the home department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }
}
