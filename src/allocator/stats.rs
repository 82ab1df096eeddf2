//! Timetable quality metrics.
//!
//! Computed from a generated timetable for callers rendering summaries
//! or warning banners. Pure read-side projection; never consulted by
//! the allocator itself.

use std::collections::HashMap;

use crate::calendar::SlotCalendar;
use crate::models::{Day, Timetable};

/// Placement quality indicators for one timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableStats {
    /// Total assignments, placeholders included.
    pub total: usize,
    /// Cleanly placed assignments.
    pub scheduled: usize,
    /// Conflict-flagged assignments (unplaceable or unrepaired).
    pub unscheduled: usize,
    /// Occupied cells over grid capacity across all batches (0.0..1.0).
    pub fill_rate: f64,
    /// Occupied slots per batch across the week.
    pub load_by_batch: HashMap<String, usize>,
    /// Occupied slots per day across all batches.
    pub load_by_day: HashMap<Day, usize>,
}

impl TimetableStats {
    /// Computes stats from a timetable and the grid it was placed into.
    pub fn calculate(timetable: &Timetable, calendar: &SlotCalendar) -> Self {
        let total = timetable.len();
        let unscheduled = timetable.conflicts().len();
        let scheduled = total - unscheduled;

        let mut load_by_batch: HashMap<String, usize> = HashMap::new();
        let mut load_by_day: HashMap<Day, usize> = HashMap::new();
        let mut occupied_cells = 0usize;

        for a in timetable.assignments.iter().filter(|a| !a.conflict) {
            let span = usize::from(a.duration_slots);
            occupied_cells += span;
            *load_by_batch.entry(a.batch_id.clone()).or_insert(0) += span;
            *load_by_day.entry(a.day).or_insert(0) += span;
        }

        let capacity = calendar.cell_count() * load_by_batch.len().max(1);
        let fill_rate = if capacity == 0 {
            0.0
        } else {
            occupied_cells as f64 / capacity as f64
        };

        Self {
            total,
            scheduled,
            unscheduled,
            fill_rate,
            load_by_batch,
            load_by_day,
        }
    }

    /// Whether every occurrence was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled == 0
    }
}
