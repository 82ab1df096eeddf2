//! Timetabling domain models.
//!
//! Core data types for representing a department's weekly scheduling
//! problem and its solution. Entity records (`Subject`, `Faculty`,
//! `Room`, `Batch`) are owned by the institutional roster and are
//! immutable inputs for one generation run; `Timetable` and
//! `AbsenceRecord` are the engine's outputs.
//!
//! # Grid Mapping
//!
//! | Type | Grid role |
//! |------|-----------|
//! | `Day`, `TimeSlot` | One cell of the weekly grid |
//! | `Assignment` | A subject occurrence placed into a cell |
//! | `Timetable` | The full grid; cell/batch/faculty projections |
//! | `AbsenceRecord` | Per-date repair log for an absent faculty |

mod absence;
mod batch;
mod faculty;
mod room;
mod subject;
mod timeslot;
mod timetable;

pub use absence::{AbsenceRecord, AttendanceStatus, Substitution};
pub use batch::Batch;
pub use faculty::Faculty;
pub use room::{Room, RoomKind};
pub use subject::{Subject, SubjectKind};
pub use timeslot::{Day, TimeSlot};
pub use timetable::{Assignment, Timetable};
