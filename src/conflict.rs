use crate::assignment::Assignment;
use crate::roster::{LookupError, Roster};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum gap required between same-day classes on different campuses.
pub const TRAVEL_BUFFER_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Overlap,
    Travel,
}

/// A blocking reason for one candidate assignment. Conflicts are ordinary
/// data, not faults: the checker returns `Ok(Some(..))` and callers decide
/// how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// The teacher is already booked over an intersecting interval.
    Overlap {
        room_name: String,
        start: NaiveDateTime,
    },
    /// Same-day classes on different campuses with less than the required
    /// travel buffer between them.
    Travel {
        existing_campus: String,
        candidate_campus: String,
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::Overlap { .. } => ConflictKind::Overlap,
            Conflict::Travel { .. } => ConflictKind::Travel,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Overlap { room_name, start } => {
                write!(
                    f,
                    "overlap: already in {} ({})",
                    room_name,
                    start.format("%H:%M")
                )
            }
            Conflict::Travel {
                existing_campus,
                candidate_campus,
            } => write!(
                f,
                "travel: needs {TRAVEL_BUFFER_MINUTES}m between {existing_campus} and {candidate_campus}"
            ),
        }
    }
}

/// Evaluate a candidate assignment against the committed schedule.
///
/// Assignments for other teachers are skipped. For each remaining entry, in
/// stored order, two rules run:
///
/// 1. Direct overlap, half-open: `candidate.start < existing.end &&
///    candidate.end > existing.start`. Touching boundaries do not conflict.
/// 2. Travel buffer, only when rule 1 did not fire for that entry, both
///    starts fall on the same calendar date, and the campuses differ: a
///    non-negative gap shorter than [`TRAVEL_BUFFER_MINUTES`] on either
///    side of the existing entry blocks the candidate. Negative gaps mean
///    the intervals are not in that adjacency order and never fire.
///
/// The first conflict found is returned; the scan does not collect further
/// blocking reasons. The candidate's room must resolve before any scanning,
/// and an existing entry whose room no longer resolves is a data-integrity
/// fault; both raise [`LookupError`].
pub fn check_conflicts(
    candidate: &Assignment,
    existing: &[Assignment],
    roster: &Roster,
) -> Result<Option<Conflict>, LookupError> {
    let candidate_room = roster.room_by_id(&candidate.room_id)?;

    for prior in existing.iter().filter(|a| a.teacher_id == candidate.teacher_id) {
        let prior_room = roster.room_by_id(&prior.room_id)?;

        if candidate.start < prior.end && candidate.end > prior.start {
            return Ok(Some(Conflict::Overlap {
                room_name: prior_room.name.clone(),
                start: prior.start,
            }));
        }

        if prior_room.campus != candidate_room.campus
            && candidate.start.date() == prior.start.date()
        {
            let gap_after = (candidate.start - prior.end).num_seconds();
            let gap_before = (prior.start - candidate.end).num_seconds();
            let limit = TRAVEL_BUFFER_MINUTES * 60;
            if (0..limit).contains(&gap_after) || (0..limit).contains(&gap_before) {
                return Ok(Some(Conflict::Travel {
                    existing_campus: prior_room.campus.clone(),
                    candidate_campus: candidate_room.campus.clone(),
                }));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Room, Teacher};
    use chrono::NaiveDate;

    fn roster() -> Roster {
        Roster::from_parts(
            vec![Teacher::new("T1", "Ada Lin", "Full-time")],
            vec![
                Room::new("R1", "Lab A", "North"),
                Room::new("R2", "Studio B", "South"),
            ],
        )
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn conflict_messages_are_display_ready() {
        let overlap = Conflict::Overlap {
            room_name: "Lab A".into(),
            start: at(9, 0),
        };
        assert_eq!(overlap.to_string(), "overlap: already in Lab A (09:00)");
        assert_eq!(overlap.kind(), ConflictKind::Overlap);

        let travel = Conflict::Travel {
            existing_campus: "North".into(),
            candidate_campus: "South".into(),
        };
        assert_eq!(travel.to_string(), "travel: needs 30m between North and South");
        assert_eq!(travel.kind(), ConflictKind::Travel);
    }

    #[test]
    fn candidate_room_must_resolve_before_scanning() {
        let candidate = Assignment::new("X", "T1", "R9", at(9, 0), at(10, 0));
        let err = check_conflicts(&candidate, &[], &roster()).expect_err("unknown room");
        assert!(matches!(err, LookupError::UnknownRoom(_)));
    }
}
