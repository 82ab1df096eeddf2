//! Input validation for timetable generation.
//!
//! Checks structural integrity of the domain snapshot before the
//! allocator runs. Detects:
//! - Duplicate IDs (subjects, faculty, rooms, batches)
//! - Subjects with non-positive weekly hours
//! - Batches with no matching subjects
//! - Rooms and batches with non-positive capacity/size
//!
//! All violations are collected and reported together; validation never
//! stops at the first error. Infeasibility (too few rooms or faculty
//! for the declared load) is deliberately NOT checked here — it is a
//! per-occurrence outcome surfaced as conflict flags by the allocator.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Batch, Faculty, Room, Subject};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error naming one violated invariant.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending entity.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A subject declares zero weekly hours.
    NonPositiveHours,
    /// A batch has no subjects matching its department/year/semester.
    EmptyBatch,
    /// A room or batch declares zero capacity/size.
    InvalidCapacity,
    /// A break window falls outside the teaching day.
    BreakOutsideDay,
    /// Day start is not before day end.
    InvalidDayBounds,
    /// Slot length is zero or exceeds the teaching day.
    InvalidSlotLength,
    /// The configuration lists no teaching days.
    NoDays,
    /// The configuration lists the same day twice.
    DuplicateDay,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the domain snapshot for a generation run.
///
/// Checks:
/// 1. No duplicate subject codes, faculty IDs, room IDs, or batch IDs
/// 2. Every subject has positive weekly hours
/// 3. Every batch has at least one matching subject
/// 4. Every room has positive capacity; every batch positive size
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    subjects: &[Subject],
    faculty: &[Faculty],
    rooms: &[Room],
    batches: &[Batch],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut subject_codes = HashSet::new();
    for s in subjects {
        if !subject_codes.insert(s.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject code: {}", s.code),
            ));
        }
        if s.weekly_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveHours,
                format!("Subject '{}' declares zero weekly hours", s.code),
            ));
        }
    }

    let mut faculty_ids = HashSet::new();
    for f in faculty {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' declares zero capacity", r.id),
            ));
        }
    }

    let mut batch_ids = HashSet::new();
    for b in batches {
        if !batch_ids.insert(b.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate batch ID: {}", b.id),
            ));
        }
        if b.size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Batch '{}' declares zero size", b.id),
            ));
        }
        if !subjects.iter().any(|s| s.matches(b)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyBatch,
                format!(
                    "Batch '{}' has no subjects for {}/{}/{}",
                    b.id, b.department, b.year, b.semester
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
