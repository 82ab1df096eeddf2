//! Deterministic greedy allocator.
//!
//! # Algorithm
//!
//! 1. Validate the domain snapshot; abort before any placement on
//!    malformed input.
//! 2. Order batches by (department, year, semester, id); within a
//!    batch, order subjects by descending occurrence count, then code.
//!    Front-loading the heaviest subjects reduces late-stage failures.
//! 3. For each required occurrence, scan cells in calendar order. Labs
//!    scan consecutive-pair spans; theory scans single cells. A span
//!    qualifies when the batch, a fitting room, and a department
//!    faculty member are all free across every cell of the span.
//! 4. Among qualifying rooms and faculty, always pick the lowest
//!    identifier.
//! 5. Reserve the span and emit the assignment; an occurrence with no
//!    qualifying span anywhere in the week becomes an unscheduled
//!    placeholder (`conflict = true`) and the run continues.
//!
//! # Complexity
//! O(b * o * c * (r + f)) where b=batches, o=occurrences/batch,
//! c=cells/week, r=rooms, f=faculty.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::calendar::SlotCalendar;
use crate::config::TimetableConfig;
use crate::conflict::ConflictIndex;
use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, Batch, Day, Faculty, Room, Subject, SubjectKind, Timetable};
use crate::validation::validate_input;

/// Deterministic greedy timetable allocator.
///
/// Construction validates the grid configuration; `allocate` validates
/// the domain snapshot and produces a structurally complete timetable.
/// Identical input always produces an identical timetable.
///
/// # Example
///
/// ```
/// use dept_timetable::allocator::Allocator;
/// use dept_timetable::config::TimetableConfig;
/// use dept_timetable::models::{Batch, Faculty, Room, Subject};
///
/// let subjects = vec![Subject::theory("CS301")
///     .with_department("CSE")
///     .with_cohort(3, 5)
///     .with_weekly_hours(3)];
/// let faculty = vec![Faculty::new("asha@univ.edu").with_department("CSE")];
/// let rooms = vec![Room::theory("B-204").with_capacity(70)];
/// let batches = vec![Batch::new("CSE-3A")
///     .with_department("CSE")
///     .with_cohort(3, 5)
///     .with_size(62)];
///
/// let allocator = Allocator::new(TimetableConfig::default()).unwrap();
/// let timetable = allocator
///     .allocate(&subjects, &faculty, &rooms, &batches)
///     .unwrap();
/// assert_eq!(timetable.len(), 3);
/// assert!(timetable.is_conflict_free());
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    config: TimetableConfig,
    calendar: SlotCalendar,
}

impl Allocator {
    /// Builds an allocator for the given grid configuration.
    ///
    /// # Errors
    /// `EngineError::Validation` listing every configuration violation.
    pub fn new(config: TimetableConfig) -> EngineResult<Self> {
        let calendar = SlotCalendar::new(&config).map_err(EngineError::Validation)?;
        Ok(Self { config, calendar })
    }

    /// The enumerated grid this allocator places into.
    pub fn calendar(&self) -> &SlotCalendar {
        &self.calendar
    }

    /// The configuration this allocator was built from.
    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Produces a timetable for the given domain snapshot.
    ///
    /// Every required occurrence of every batch's subjects gets an
    /// assignment; occurrences with no legal placement are flagged
    /// `conflict = true` rather than aborting the run.
    ///
    /// # Errors
    /// `EngineError::Validation` on malformed input, the only fatal
    /// condition; infeasibility is never an error.
    pub fn allocate(
        &self,
        subjects: &[Subject],
        faculty: &[Faculty],
        rooms: &[Room],
        batches: &[Batch],
    ) -> EngineResult<Timetable> {
        validate_input(subjects, faculty, rooms, batches).map_err(EngineError::Validation)?;

        let mut faculty_by_id: Vec<&Faculty> = faculty.iter().collect();
        faculty_by_id.sort_by(|a, b| a.id.cmp(&b.id));
        let mut rooms_by_id: Vec<&Room> = rooms.iter().collect();
        rooms_by_id.sort_by(|a, b| a.id.cmp(&b.id));
        let mut batch_order: Vec<&Batch> = batches.iter().collect();
        batch_order.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));

        let mut index = ConflictIndex::new();
        let mut tally = DailyTally::default();
        let mut timetable = Timetable::new();

        for batch in batch_order {
            let mut plan: Vec<&Subject> = subjects.iter().filter(|s| s.matches(batch)).collect();
            plan.sort_by(|a, b| {
                b.occurrences()
                    .cmp(&a.occurrences())
                    .then_with(|| a.code.cmp(&b.code))
            });

            for subject in plan {
                for _ in 0..subject.occurrences() {
                    let assignment = self.place_occurrence(
                        subject,
                        batch,
                        &faculty_by_id,
                        &rooms_by_id,
                        &mut index,
                        &mut tally,
                    )?;
                    if assignment.conflict {
                        debug!(
                            subject = %subject.code,
                            batch = %batch.id,
                            "occurrence unplaceable, flagged"
                        );
                    }
                    timetable.add(assignment);
                }
            }
        }

        info!(
            assignments = timetable.len(),
            unplaced = timetable.conflicts().len(),
            "timetable generated"
        );
        Ok(timetable)
    }

    /// Places one occurrence, or emits a flagged placeholder when the
    /// whole week has no qualifying span.
    fn place_occurrence(
        &self,
        subject: &Subject,
        batch: &Batch,
        faculty_by_id: &[&Faculty],
        rooms_by_id: &[&Room],
        index: &mut ConflictIndex,
        tally: &mut DailyTally,
    ) -> EngineResult<Assignment> {
        let span = subject.slots_per_occurrence();

        for &day in self.calendar.days() {
            if !tally.allows(batch, day, subject, span, &self.config) {
                continue;
            }

            let candidate_spans: Vec<Vec<u16>> = match subject.kind {
                SubjectKind::Theory => self
                    .calendar
                    .cells_for_day(day)
                    .iter()
                    .map(|&s| vec![s])
                    .collect(),
                SubjectKind::Lab => self
                    .calendar
                    .pairs_for_day(day)
                    .into_iter()
                    .map(|(a, b)| vec![a, b])
                    .collect(),
            };

            for cells in candidate_spans {
                if !cells.iter().all(|&s| index.batch_free(day, s, &batch.id)) {
                    continue;
                }
                let Some(room) = rooms_by_id.iter().find(|r| {
                    r.fits(subject.kind, batch.size)
                        && cells.iter().all(|&s| index.room_free(day, s, &r.id))
                }) else {
                    continue;
                };
                let Some(instructor) = faculty_by_id.iter().find(|f| {
                    f.department == subject.department
                        && cells.iter().all(|&s| index.faculty_free(day, s, &f.id))
                }) else {
                    continue;
                };

                for &s in &cells {
                    index.reserve(day, s, Some(&instructor.id), Some(&room.id), Some(&batch.id))?;
                }
                tally.commit(batch, day, subject, span);

                return Ok(Assignment::new(day, cells[0], &subject.code, &batch.id)
                    .with_faculty(&instructor.id)
                    .with_room(&room.id)
                    .with_duration(span));
            }
        }

        // Structurally complete output: the unplaceable occurrence is
        // pinned to the first grid cell, unreserved and unbound.
        let (day, start) = self.first_cell();
        Ok(Assignment::new(day, start, &subject.code, &batch.id)
            .with_duration(span)
            .unscheduled())
    }

    fn first_cell(&self) -> (Day, u16) {
        let day = self.calendar.days()[0];
        let start = self
            .calendar
            .cells_for_day(day)
            .first()
            .copied()
            .unwrap_or(self.config.day_start_min);
        (day, start)
    }
}

/// Per-batch daily placement tallies backing the daily-cap checks.
#[derive(Debug, Default)]
struct DailyTally {
    /// (batch, day, subject) -> occurrences placed.
    subject_count: HashMap<(String, Day, String), u8>,
    /// (batch, day) -> slots occupied.
    slot_load: HashMap<(String, Day), u8>,
}

impl DailyTally {
    fn allows(
        &self,
        batch: &Batch,
        day: Day,
        subject: &Subject,
        span: u8,
        config: &TimetableConfig,
    ) -> bool {
        let same = self
            .subject_count
            .get(&(batch.id.clone(), day, subject.code.clone()))
            .copied()
            .unwrap_or(0);
        if same >= config.max_same_subject_per_day {
            return false;
        }
        if let Some(cap) = config.max_daily_load_per_batch {
            let load = self
                .slot_load
                .get(&(batch.id.clone(), day))
                .copied()
                .unwrap_or(0);
            if load + span > cap {
                return false;
            }
        }
        true
    }

    fn commit(&mut self, batch: &Batch, day: Day, subject: &Subject, span: u8) {
        *self
            .subject_count
            .entry((batch.id.clone(), day, subject.code.clone()))
            .or_insert(0) += 1;
        *self
            .slot_load
            .entry((batch.id.clone(), day))
            .or_insert(0) += span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Mon-Fri, 09:00-15:00, 60-minute slots, no breaks: 6 slots/day, 30 cells.
    fn grid_config() -> TimetableConfig {
        TimetableConfig::default()
            .with_days(vec![Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri])
            .with_day_bounds(540, 900)
            .with_breaks(vec![])
    }

    fn cse_batch() -> Batch {
        Batch::new("CSE-3A")
            .with_department("CSE")
            .with_cohort(3, 5)
            .with_size(60)
    }

    fn theory_subject(code: &str, hours: u8) -> Subject {
        Subject::theory(code)
            .with_department("CSE")
            .with_cohort(3, 5)
            .with_weekly_hours(hours)
    }

    fn base_inputs() -> (Vec<Faculty>, Vec<Room>) {
        (
            vec![Faculty::new("asha@univ.edu").with_department("CSE")],
            vec![Room::theory("B-204").with_capacity(70)],
        )
    }

    #[test]
    fn test_three_occurrences_three_distinct_cells() {
        let (faculty, rooms) = base_inputs();
        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(
                &[theory_subject("CS301", 3)],
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap();

        assert_eq!(t.len(), 3);
        assert!(t.is_conflict_free());
        let cells: HashSet<(Day, u16)> =
            t.assignments.iter().map(|a| (a.day, a.start_min)).collect();
        assert_eq!(cells.len(), 3);
        for a in &t.assignments {
            assert_eq!(a.faculty_id.as_deref(), Some("asha@univ.edu"));
            assert_eq!(a.room_id.as_deref(), Some("B-204"));
        }
    }

    #[test]
    fn test_overload_flags_remainder_never_errors() {
        // 31 required occurrences into a 30-cell week.
        let (faculty, rooms) = base_inputs();
        let allocator =
            Allocator::new(grid_config().with_same_subject_cap(31)).unwrap();
        let t = allocator
            .allocate(
                &[theory_subject("CS301", 31)],
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap();

        assert_eq!(t.len(), 31);
        assert_eq!(t.conflicts().len(), 1);
        let placed = t.assignments.iter().filter(|a| !a.conflict).count();
        assert_eq!(placed, 30);
        // The placeholder carries no bindings.
        let placeholder = t.conflicts()[0];
        assert_eq!(placeholder.faculty_id, None);
        assert_eq!(placeholder.room_id, None);
    }

    #[test]
    fn test_lab_spans_two_consecutive_cells() {
        let faculty = vec![Faculty::new("ravi@univ.edu").with_department("CSE")];
        let rooms = vec![
            Room::theory("B-204").with_capacity(70),
            Room::lab("LAB-2").with_capacity(70),
        ];
        let lab = Subject::lab("CS351")
            .with_department("CSE")
            .with_cohort(3, 5)
            .with_weekly_hours(4);

        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(&[lab], &faculty, &rooms, &[cse_batch()])
            .unwrap();

        // 4 weekly hours = 2 double-slot occurrences.
        assert_eq!(t.len(), 2);
        assert!(t.is_conflict_free());
        for a in &t.assignments {
            assert_eq!(a.duration_slots, 2);
            assert_eq!(a.room_id.as_deref(), Some("LAB-2"));
            // Second cell is adjacent and on the grid.
            let cal = allocator.calendar();
            assert!(cal.cells_for_day(a.day).contains(&(a.start_min + 60)));
        }
    }

    #[test]
    fn test_lab_without_lab_room_is_flagged() {
        let (faculty, rooms) = base_inputs(); // theory room only
        let lab = Subject::lab("CS351")
            .with_department("CSE")
            .with_cohort(3, 5)
            .with_weekly_hours(2);

        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(&[lab], &faculty, &rooms, &[cse_batch()])
            .unwrap();

        assert_eq!(t.len(), 1);
        assert_eq!(t.conflicts().len(), 1);
    }

    #[test]
    fn test_lowest_identifier_wins_ties() {
        let faculty = vec![
            Faculty::new("zoya@univ.edu").with_department("CSE"),
            Faculty::new("asha@univ.edu").with_department("CSE"),
        ];
        let rooms = vec![
            Room::theory("B-301").with_capacity(70),
            Room::theory("A-101").with_capacity(70),
        ];
        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(
                &[theory_subject("CS301", 1)],
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap();

        assert_eq!(t.assignments[0].faculty_id.as_deref(), Some("asha@univ.edu"));
        assert_eq!(t.assignments[0].room_id.as_deref(), Some("A-101"));
    }

    #[test]
    fn test_same_subject_daily_cap() {
        let (faculty, rooms) = base_inputs();
        // Default cap: one occurrence of a subject per day.
        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(
                &[theory_subject("CS301", 5)],
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap();

        assert!(t.is_conflict_free());
        let days: HashSet<Day> = t.assignments.iter().map(|a| a.day).collect();
        assert_eq!(days.len(), 5); // one per day, never doubled
    }

    #[test]
    fn test_daily_load_cap_spreads_batch_load() {
        let (faculty, rooms) = base_inputs();
        let subjects = vec![
            theory_subject("CS301", 3),
            theory_subject("CS302", 3),
        ];
        let allocator = Allocator::new(
            grid_config().with_same_subject_cap(2).with_daily_load_cap(2),
        )
        .unwrap();
        let t = allocator
            .allocate(&subjects, &faculty, &rooms, &[cse_batch()])
            .unwrap();

        assert!(t.is_conflict_free());
        let mut per_day: HashMap<Day, u8> = HashMap::new();
        for a in &t.assignments {
            *per_day.entry(a.day).or_insert(0) += a.duration_slots;
        }
        assert!(per_day.values().all(|&load| load <= 2));
    }

    #[test]
    fn test_no_double_booking_across_batches() {
        let faculty = vec![
            Faculty::new("asha@univ.edu").with_department("CSE"),
            Faculty::new("ravi@univ.edu").with_department("CSE"),
        ];
        let rooms = vec![
            Room::theory("A-101").with_capacity(70),
            Room::theory("A-102").with_capacity(70),
            Room::lab("LAB-2").with_capacity(70),
        ];
        let subjects = vec![
            theory_subject("CS301", 4),
            theory_subject("CS302", 3),
            Subject::lab("CS351")
                .with_department("CSE")
                .with_cohort(3, 5)
                .with_weekly_hours(2),
        ];
        let batches = vec![
            cse_batch(),
            Batch::new("CSE-3B")
                .with_department("CSE")
                .with_cohort(3, 5)
                .with_size(60),
        ];

        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(&subjects, &faculty, &rooms, &batches)
            .unwrap();

        // Expand every scheduled assignment into its occupied cells and
        // assert uniqueness per dimension.
        let mut fac_cells = HashSet::new();
        let mut room_cells = HashSet::new();
        let mut batch_cells = HashSet::new();
        for a in t.assignments.iter().filter(|a| !a.conflict) {
            for s in a.cell_starts(60) {
                assert!(fac_cells.insert((a.day, s, a.faculty_id.clone())));
                assert!(room_cells.insert((a.day, s, a.room_id.clone())));
                assert!(batch_cells.insert((a.day, s, a.batch_id.clone())));
            }
        }
    }

    #[test]
    fn test_batch_order_is_stable() {
        // Both batches want the same single faculty member; the batch
        // with the lexicographically earlier id is served first.
        let (faculty, _) = base_inputs();
        let rooms = vec![
            Room::theory("A-101").with_capacity(70),
            Room::theory("A-102").with_capacity(70),
        ];
        let batches = vec![
            Batch::new("CSE-3B")
                .with_department("CSE")
                .with_cohort(3, 5)
                .with_size(60),
            cse_batch(), // CSE-3A, listed second on purpose
        ];
        let allocator = Allocator::new(grid_config()).unwrap();
        let t = allocator
            .allocate(&[theory_subject("CS301", 1)], &faculty, &rooms, &batches)
            .unwrap();

        assert_eq!(t.assignments[0].batch_id, "CSE-3A");
    }

    #[test]
    fn test_deterministic_output() {
        let faculty = vec![
            Faculty::new("asha@univ.edu").with_department("CSE"),
            Faculty::new("ravi@univ.edu").with_department("CSE"),
        ];
        let rooms = vec![
            Room::theory("A-101").with_capacity(70),
            Room::theory("A-102").with_capacity(70),
        ];
        let subjects = vec![theory_subject("CS301", 3), theory_subject("CS302", 2)];
        let batches = vec![cse_batch()];

        let allocator = Allocator::new(grid_config()).unwrap();
        let a = allocator
            .allocate(&subjects, &faculty, &rooms, &batches)
            .unwrap();
        let b = allocator
            .allocate(&subjects, &faculty, &rooms, &batches)
            .unwrap();

        let bytes_a = serde_json::to_string(&a).unwrap();
        let bytes_b = serde_json::to_string(&b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_malformed_input_aborts_before_allocation() {
        let (faculty, rooms) = base_inputs();
        let allocator = Allocator::new(grid_config()).unwrap();
        let err = allocator
            .allocate(
                &[theory_subject("CS301", 0)], // zero weekly hours
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_no_assignment_starts_in_a_break() {
        let (faculty, rooms) = base_inputs();
        let config = grid_config().with_break(660, 60); // 11:00-12:00
        let allocator = Allocator::new(config).unwrap();
        let t = allocator
            .allocate(
                &[theory_subject("CS301", 5)],
                &faculty,
                &rooms,
                &[cse_batch()],
            )
            .unwrap();

        assert!(t.is_conflict_free());
        for a in &t.assignments {
            assert!(!allocator.calendar().is_break(a.start_min));
            assert_ne!(a.start_min, 660);
        }
    }
}
