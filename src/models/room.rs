//! Room model.

use serde::{Deserialize, Serialize};

use super::SubjectKind;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier (e.g. "B-204").
    pub id: String,
    /// Seating capacity.
    pub capacity: u16,
    /// Floor number.
    pub floor: i16,
    /// Room classification.
    pub kind: RoomKind,
}

/// Room classification.
///
/// Lab subjects may only be placed in lab rooms; theory subjects in
/// theory rooms. `Other` rooms (seminar halls, auditoriums) are never
/// picked by the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// Lecture classroom.
    Theory,
    /// Practical laboratory.
    Lab,
    /// Any other space.
    Other,
}

impl Room {
    /// Creates a room of the given kind.
    pub fn new(id: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            capacity: 0,
            floor: 0,
            kind,
        }
    }

    /// Creates a lecture classroom.
    pub fn theory(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Theory)
    }

    /// Creates a laboratory.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Lab)
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u16) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the floor number.
    pub fn with_floor(mut self, floor: i16) -> Self {
        self.floor = floor;
        self
    }

    /// Whether this room can host a subject of the given kind for a
    /// batch of the given size.
    pub fn fits(&self, kind: SubjectKind, batch_size: u16) -> bool {
        let kind_ok = match kind {
            SubjectKind::Theory => self.kind == RoomKind::Theory,
            SubjectKind::Lab => self.kind == RoomKind::Lab,
        };
        kind_ok && self.capacity >= batch_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::lab("LAB-2").with_capacity(30).with_floor(2);
        assert_eq!(r.kind, RoomKind::Lab);
        assert_eq!(r.capacity, 30);
        assert_eq!(r.floor, 2);
    }

    #[test]
    fn test_fits_kind_and_capacity() {
        let lab = Room::lab("LAB-2").with_capacity(30);
        assert!(lab.fits(SubjectKind::Lab, 30));
        assert!(!lab.fits(SubjectKind::Lab, 31)); // too small
        assert!(!lab.fits(SubjectKind::Theory, 10)); // wrong kind

        let hall = Room::new("AUD-1", RoomKind::Other).with_capacity(300);
        assert!(!hall.fits(SubjectKind::Theory, 60));
        assert!(!hall.fits(SubjectKind::Lab, 60));
    }
}
