//! Slot calendar: the valid cells of the weekly grid.
//!
//! Interprets a [`TimetableConfig`] into the ordered set of (day, slot)
//! cells available for teaching. Slots overlapping a break window are
//! excluded at enumeration time, so downstream code never sees them.
//!
//! Pure function of configuration; holds no scheduling state. Invalid
//! configuration is rejected with the full list of violations — never
//! silently clipped.

use crate::config::TimetableConfig;
use crate::models::{Day, TimeSlot};
use crate::validation::{ValidationError, ValidationErrorKind};

/// The enumerated weekly grid.
///
/// Every configured day shares the same daily slot pattern (same day
/// bounds and breaks), so the per-day starts are computed once.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    days: Vec<Day>,
    day_slots: Vec<u16>,
    slot_len_min: u16,
    breaks: Vec<(u16, u16)>,
}

impl SlotCalendar {
    /// Builds the grid from configuration.
    ///
    /// # Errors
    /// Returns every configuration violation found: zero or oversized
    /// slot length, reversed day bounds, empty or duplicated day list,
    /// break windows outside the teaching day.
    pub fn new(config: &TimetableConfig) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if config.days.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoDays,
                "Configuration lists no teaching days",
            ));
        }
        for (i, day) in config.days.iter().enumerate() {
            if config.days[..i].contains(day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateDay,
                    format!("Day {day} listed more than once"),
                ));
            }
        }

        if config.day_start_min >= config.day_end_min {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayBounds,
                format!(
                    "Day start {} is not before day end {}",
                    config.day_start_min, config.day_end_min
                ),
            ));
        }

        if config.slot_len_min == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlotLength,
                "Slot length is zero",
            ));
        } else if config.day_start_min < config.day_end_min
            && config.slot_len_min > config.day_end_min - config.day_start_min
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlotLength,
                format!(
                    "Slot length {} exceeds the teaching day",
                    config.slot_len_min
                ),
            ));
        }

        for b in &config.breaks {
            if b.start_min < config.day_start_min || b.end_min() > config.day_end_min {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BreakOutsideDay,
                    format!(
                        "Break {}..{} falls outside day bounds {}..{}",
                        b.start_min,
                        b.end_min(),
                        config.day_start_min,
                        config.day_end_min
                    ),
                ));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let breaks: Vec<(u16, u16)> = config
            .breaks
            .iter()
            .map(|b| (b.start_min, b.end_min()))
            .collect();

        let mut day_slots = Vec::new();
        let mut start = config.day_start_min;
        while start + config.slot_len_min <= config.day_end_min {
            let end = start + config.slot_len_min;
            let in_break = breaks.iter().any(|&(bs, be)| start < be && bs < end);
            if !in_break {
                day_slots.push(start);
            }
            start += config.slot_len_min;
        }

        Ok(Self {
            days: config.days.clone(),
            day_slots,
            slot_len_min: config.slot_len_min,
            breaks,
        })
    }

    /// Configured teaching days, in scan order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Ordered slot start minutes for one day.
    ///
    /// Empty if the day is not part of the configured week.
    pub fn cells_for_day(&self, day: Day) -> &[u16] {
        if self.days.contains(&day) {
            &self.day_slots
        } else {
            &[]
        }
    }

    /// All cells of the week in calendar order (day, then slot).
    pub fn cells(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.days
            .iter()
            .flat_map(move |&day| self.day_slots.iter().map(move |&s| TimeSlot::new(day, s)))
    }

    /// Whether a slot starting at `start_min` would overlap a break.
    pub fn is_break(&self, start_min: u16) -> bool {
        let end = start_min + self.slot_len_min;
        self.breaks.iter().any(|&(bs, be)| start_min < be && bs < end)
    }

    /// Consecutive cell pairs for one day, for lab double slots.
    ///
    /// A pair qualifies only when the second slot starts exactly where
    /// the first ends; a break between two grid slots breaks adjacency.
    pub fn pairs_for_day(&self, day: Day) -> Vec<(u16, u16)> {
        let slots = self.cells_for_day(day);
        slots
            .windows(2)
            .filter(|w| w[1] == w[0] + self.slot_len_min)
            .map(|w| (w[0], w[1]))
            .collect()
    }

    /// Uniform slot length in minutes.
    pub fn slot_len_min(&self) -> u16 {
        self.slot_len_min
    }

    /// Number of teaching slots per day.
    pub fn slots_per_day(&self) -> usize {
        self.day_slots.len()
    }

    /// Total cell count of the week.
    pub fn cell_count(&self) -> usize {
        self.days.len() * self.day_slots.len()
    }
}
