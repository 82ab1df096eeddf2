//! Grid configuration.
//!
//! `TimetableConfig` describes the weekly teaching grid: which days
//! exist, when a day starts and ends, how long one slot is, where the
//! break windows sit, and the allocator's daily caps. It is plain data;
//! [`SlotCalendar`](crate::calendar::SlotCalendar) interprets and
//! validates it.

use serde::{Deserialize, Serialize};

use crate::models::Day;

/// A break window inside the teaching day (lunch, tea).
///
/// Slots overlapping a break are excluded from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    /// Break start in minutes from midnight.
    pub start_min: u16,
    /// Break length in minutes.
    pub duration_min: u16,
}

impl BreakWindow {
    /// Creates a break window.
    pub fn new(start_min: u16, duration_min: u16) -> Self {
        Self {
            start_min,
            duration_min,
        }
    }

    /// End minute (exclusive).
    #[inline]
    pub fn end_min(&self) -> u16 {
        self.start_min + self.duration_min
    }
}

/// Configuration for one timetable generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Teaching days, in the order cells are scanned.
    pub days: Vec<Day>,
    /// Day start in minutes from midnight.
    pub day_start_min: u16,
    /// Day end in minutes from midnight (exclusive).
    pub day_end_min: u16,
    /// Uniform slot length in minutes.
    pub slot_len_min: u16,
    /// Break windows excluded from the grid.
    pub breaks: Vec<BreakWindow>,
    /// Max occurrences of one subject per batch per day.
    pub max_same_subject_per_day: u8,
    /// Max occupied slots per batch per day. `None` = unlimited.
    pub max_daily_load_per_batch: Option<u8>,
}

impl Default for TimetableConfig {
    /// Monday–Saturday, 09:00–17:00, 60-minute slots, 12:00–13:00 lunch,
    /// at most one occurrence of a subject per day.
    fn default() -> Self {
        Self {
            days: Day::ALL.to_vec(),
            day_start_min: 9 * 60,
            day_end_min: 17 * 60,
            slot_len_min: 60,
            breaks: vec![BreakWindow::new(12 * 60, 60)],
            max_same_subject_per_day: 1,
            max_daily_load_per_batch: None,
        }
    }
}

impl TimetableConfig {
    /// Sets the teaching days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets day start and end (minutes from midnight).
    pub fn with_day_bounds(mut self, start_min: u16, end_min: u16) -> Self {
        self.day_start_min = start_min;
        self.day_end_min = end_min;
        self
    }

    /// Sets the slot length.
    pub fn with_slot_len(mut self, minutes: u16) -> Self {
        self.slot_len_min = minutes;
        self
    }

    /// Replaces the break windows.
    pub fn with_breaks(mut self, breaks: Vec<BreakWindow>) -> Self {
        self.breaks = breaks;
        self
    }

    /// Adds one break window.
    pub fn with_break(mut self, start_min: u16, duration_min: u16) -> Self {
        self.breaks.push(BreakWindow::new(start_min, duration_min));
        self
    }

    /// Sets the per-day same-subject cap.
    pub fn with_same_subject_cap(mut self, cap: u8) -> Self {
        self.max_same_subject_per_day = cap;
        self
    }

    /// Sets the per-day total load cap per batch.
    pub fn with_daily_load_cap(mut self, cap: u8) -> Self {
        self.max_daily_load_per_batch = Some(cap);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = TimetableConfig::default();
        assert_eq!(c.days.len(), 6);
        assert_eq!(c.day_start_min, 540);
        assert_eq!(c.slot_len_min, 60);
        assert_eq!(c.breaks.len(), 1);
        assert_eq!(c.max_same_subject_per_day, 1);
        assert_eq!(c.max_daily_load_per_batch, None);
    }

    #[test]
    fn test_builder() {
        let c = TimetableConfig::default()
            .with_days(vec![Day::Mon, Day::Wed])
            .with_day_bounds(480, 960)
            .with_slot_len(50)
            .with_breaks(vec![])
            .with_break(700, 30)
            .with_same_subject_cap(2)
            .with_daily_load_cap(6);

        assert_eq!(c.days, vec![Day::Mon, Day::Wed]);
        assert_eq!(c.slot_len_min, 50);
        assert_eq!(c.breaks, vec![BreakWindow::new(700, 30)]);
        assert_eq!(c.max_daily_load_per_batch, Some(6));
    }

    #[test]
    fn test_break_end() {
        assert_eq!(BreakWindow::new(720, 60).end_min(), 780);
    }
}
