use crate::assignment::Assignment;
use crate::assignment_validation::validate_assignment;
use crate::conflict::{Conflict, check_conflicts};
use crate::recurrence::Recurrence;
use crate::roster::{LookupError, Roster};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    Lookup(LookupError),
    InvalidRequest(String),
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableError::Lookup(err) => write!(f, "{err}"),
            TimetableError::InvalidRequest(message) => write!(f, "invalid request: {message}"),
        }
    }
}

impl std::error::Error for TimetableError {}

impl From<LookupError> for TimetableError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

/// One recurrence request: a class code, a teacher, a room, a fixed
/// time-of-day window, and the dates to try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub class_code: String,
    pub teacher_id: String,
    pub room_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub recurrence: Recurrence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedDate {
    pub date: NaiveDate,
    pub reason: Conflict,
}

/// Outcome of one batch: every candidate date lands in exactly one of the
/// two lists. Accepted members stay committed even when later candidates in
/// the same batch are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub accepted: Vec<Assignment>,
    pub rejected: Vec<RejectedDate>,
}

impl BatchOutcome {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("added={}", self.accepted.len()));
        if !self.rejected.is_empty() {
            parts.push(format!("conflicts={}", self.rejected.len()));
        }
        parts.join(", ")
    }
}

/// A master-list editor row: teacher and room are named by display name and
/// resolved through the roster's name index on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRow {
    pub class_code: String,
    pub teacher_name: String,
    pub room_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceSummary {
    pub saved: usize,
    pub dropped: usize,
}

impl ReplaceSummary {
    pub fn to_cli_summary(&self) -> String {
        if self.dropped > 0 {
            format!("saved={}, dropped={}", self.saved, self.dropped)
        } else {
            format!("saved={}", self.saved)
        }
    }
}

/// A flat display row joining an assignment to its teacher and room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub class_code: String,
    pub teacher_name: String,
    pub room_name: String,
    pub campus: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The scheduling context: one roster plus the committed schedule store.
///
/// Owned by the caller and passed by reference into every operation; there
/// is no process-wide state. Insertion order of the store is preserved and
/// drives both display and the checker's first-conflict-wins scan.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    roster: Roster,
    assignments: Vec<Assignment>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            assignments: Vec::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Empty the schedule store unconditionally. The roster is untouched.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }

    /// Read-only conflict probe against the current store.
    pub fn check(&self, candidate: &Assignment) -> Result<Option<Conflict>, LookupError> {
        check_conflicts(candidate, &self.assignments, &self.roster)
    }

    /// Expand a recurrence request and try each candidate date in
    /// chronological order against the live store. Candidates accepted
    /// earlier in the batch are visible to later checks; there is no
    /// rollback when later candidates fail.
    pub fn schedule_batch(&mut self, request: &BatchRequest) -> Result<BatchOutcome, TimetableError> {
        self.roster.teacher_by_id(&request.teacher_id)?;
        self.roster.room_by_id(&request.room_id)?;
        if request.start_time >= request.end_time {
            return Err(TimetableError::InvalidRequest(format!(
                "class window must start before it ends ({} >= {})",
                request.start_time, request.end_time
            )));
        }
        if let Recurrence::Weekly { month, .. } = &request.recurrence {
            if !(1..=12).contains(month) {
                return Err(TimetableError::InvalidRequest(format!(
                    "month {month} is out of range"
                )));
            }
        }

        let mut outcome = BatchOutcome::default();
        for date in request.recurrence.candidate_dates() {
            let candidate = Assignment::new(
                request.class_code.clone(),
                request.teacher_id.clone(),
                request.room_id.clone(),
                date.and_time(request.start_time),
                date.and_time(request.end_time),
            );
            match check_conflicts(&candidate, &self.assignments, &self.roster)? {
                Some(reason) => outcome.rejected.push(RejectedDate { date, reason }),
                None => {
                    self.assignments.push(candidate.clone());
                    outcome.accepted.push(candidate);
                }
            }
        }
        Ok(outcome)
    }

    /// Trusted bulk overwrite from the master-list editor.
    ///
    /// Rows resolve teacher and room by display name. Rows whose names are
    /// blank, unmatched, or ambiguous, and rows with a malformed interval,
    /// are dropped and only counted in the summary. The surviving rows
    /// replace the store verbatim: the conflict checker is NOT re-run.
    pub fn replace_all(&mut self, rows: Vec<MasterRow>) -> ReplaceSummary {
        let mut replacement = Vec::with_capacity(rows.len());
        let mut dropped = 0;
        for row in rows {
            let Some(teacher_id) = self.roster.teacher_id_by_name(row.teacher_name.trim()) else {
                dropped += 1;
                continue;
            };
            let Some(room_id) = self.roster.room_id_by_name(row.room_name.trim()) else {
                dropped += 1;
                continue;
            };
            let assignment = Assignment::new(
                row.class_code,
                teacher_id.to_string(),
                room_id.to_string(),
                row.start,
                row.end,
            );
            if validate_assignment(&assignment).is_err() {
                dropped += 1;
                continue;
            }
            replacement.push(assignment);
        }
        let saved = replacement.len();
        self.assignments = replacement;
        ReplaceSummary { saved, dropped }
    }

    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.teacher_id == teacher_id)
            .collect()
    }

    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Join every assignment to display names and campus, in store order.
    pub fn rows(&self) -> Result<Vec<ScheduleRow>, LookupError> {
        let mut rows = Vec::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            let teacher = self.roster.teacher_by_id(&assignment.teacher_id)?;
            let room = self.roster.room_by_id(&assignment.room_id)?;
            rows.push(ScheduleRow {
                class_code: assignment.class_code.clone(),
                teacher_name: teacher.name.clone(),
                room_name: room.name.clone(),
                campus: room.campus.clone(),
                start: assignment.start,
                end: assignment.end,
            });
        }
        Ok(rows)
    }
}
