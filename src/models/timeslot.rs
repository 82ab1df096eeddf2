//! Weekday and time slot primitives.
//!
//! The timetable grid is a fixed week: `Day` enumerates Monday through
//! Saturday (no Sunday teaching), and a `TimeSlot` is one cell of the
//! grid identified by its day and start minute.
//!
//! # Time Model
//! Times are minutes from midnight (`u16`). The slot length is uniform
//! across the grid and lives in [`TimetableConfig`](crate::config::TimetableConfig);
//! a slot does not carry its own duration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A teaching day.
///
/// Ordered Monday first, so deriving `Ord` gives calendar order for free.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// All teaching days in calendar order.
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Maps a calendar weekday onto a teaching day.
    ///
    /// Returns `None` for Sunday — absences dated on a Sunday affect
    /// no timetable cells.
    pub fn from_weekday(weekday: chrono::Weekday) -> Option<Self> {
        match weekday {
            chrono::Weekday::Mon => Some(Day::Mon),
            chrono::Weekday::Tue => Some(Day::Tue),
            chrono::Weekday::Wed => Some(Day::Wed),
            chrono::Weekday::Thu => Some(Day::Thu),
            chrono::Weekday::Fri => Some(Day::Fri),
            chrono::Weekday::Sat => Some(Day::Sat),
            chrono::Weekday::Sun => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        };
        f.write_str(name)
    }
}

/// One cell of the weekly grid: a day and a start minute.
///
/// Totally ordered (day first, then start time), which makes calendar
/// order the natural sort order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSlot {
    /// Teaching day.
    pub day: Day,
    /// Start time in minutes from midnight.
    pub start_min: u16,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(day: Day, start_min: u16) -> Self {
        Self { day, start_min }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}",
            self.day,
            self.start_min / 60,
            self.start_min % 60
        )
    }
}
