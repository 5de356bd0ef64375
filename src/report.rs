use crate::assignment::Assignment;
use crate::roster::{LookupError, Roster};
use crate::timetable::Timetable;
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug)]
pub enum ReportError {
    DataFrame(PolarsError),
    Lookup(LookupError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::DataFrame(err) => write!(f, "aggregation error: {err}"),
            ReportError::Lookup(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<PolarsError> for ReportError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<LookupError> for ReportError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherWorkload {
    pub teacher_id: String,
    pub name: String,
    pub kind: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOccupancy {
    pub room_id: String,
    pub name: String,
    pub campus: String,
    pub hours: f64,
}

/// Workload and occupancy summaries over one date range, each sorted by
/// hours descending (name as the tiebreak).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadReport {
    pub teachers: Vec<TeacherWorkload>,
    pub rooms: Vec<RoomOccupancy>,
}

/// Assignments whose start date falls in `[range_start, range_end]`,
/// inclusive on both ends.
pub fn assignments_in_range<'a>(
    timetable: &'a Timetable,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<&'a Assignment> {
    timetable
        .assignments()
        .iter()
        .filter(|a| a.date() >= range_start && a.date() <= range_end)
        .collect()
}

/// Sum scheduled hours per teacher and per room over the range.
///
/// An empty range yields an empty report; unresolved teacher or room
/// references are data-integrity faults and raise.
pub fn aggregate_range(
    timetable: &Timetable,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<WorkloadReport, ReportError> {
    let filtered = assignments_in_range(timetable, range_start, range_end);
    if filtered.is_empty() {
        return Ok(WorkloadReport::default());
    }

    let teacher_ids: Vec<&str> = filtered.iter().map(|a| a.teacher_id.as_str()).collect();
    let room_ids: Vec<&str> = filtered.iter().map(|a| a.room_id.as_str()).collect();
    let hours: Vec<f64> = filtered.iter().map(|a| a.duration_hours()).collect();
    let df = DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("teacher_id"), teacher_ids).into_column(),
        Series::new(PlSmallStr::from_static("room_id"), room_ids).into_column(),
        Series::new(PlSmallStr::from_static("hours"), hours).into_column(),
    ])?;

    let roster = timetable.roster();
    let mut teachers = Vec::new();
    for (id, total) in sum_hours_by(&df, "teacher_id")? {
        let teacher = roster.teacher_by_id(&id)?;
        teachers.push(TeacherWorkload {
            teacher_id: id,
            name: teacher.name.clone(),
            kind: teacher.kind.clone(),
            hours: total,
        });
    }
    teachers.sort_by(|a, b| compare_hours(a.hours, b.hours).then_with(|| a.name.cmp(&b.name)));

    let mut rooms = Vec::new();
    for (id, total) in sum_hours_by(&df, "room_id")? {
        let room = roster.room_by_id(&id)?;
        rooms.push(RoomOccupancy {
            room_id: id,
            name: room.name.clone(),
            campus: room.campus.clone(),
            hours: total,
        });
    }
    rooms.sort_by(|a, b| compare_hours(a.hours, b.hours).then_with(|| a.name.cmp(&b.name)));

    Ok(WorkloadReport { teachers, rooms })
}

fn sum_hours_by(df: &DataFrame, key: &str) -> Result<Vec<(String, f64)>, PolarsError> {
    let totals = df
        .clone()
        .lazy()
        .group_by([col(key)])
        .agg([col("hours").sum()])
        .collect()?;

    let ids = totals.column(key)?.str()?;
    let sums = totals.column("hours")?.f64()?;
    let mut rows = Vec::with_capacity(totals.height());
    for (id, total) in ids.into_iter().zip(sums.into_iter()) {
        if let (Some(id), Some(total)) = (id, total) {
            rows.push((id.to_string(), total));
        }
    }
    Ok(rows)
}

fn compare_hours(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
