use super::{PersistenceError, PersistenceResult};
use crate::roster::{DEFAULT_TEACHER_KIND, Room, Teacher};
use crate::timetable::{MasterRow, ScheduleRow, Timetable};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct TeacherCsvRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RoomCsvRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Campus")]
    campus: String,
}

/// Import teacher rows from a `ID,Name,Type` file. A missing `Type` column
/// (or a blank cell) falls back to [`DEFAULT_TEACHER_KIND`].
pub fn load_teachers_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Teacher>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut teachers = Vec::new();
    for (row, record) in reader.deserialize::<TeacherCsvRecord>().enumerate() {
        let record = record?;
        if record.id.trim().is_empty() || record.name.trim().is_empty() {
            return Err(PersistenceError::InvalidData(format!(
                "teacher row {} requires both ID and Name",
                row + 1
            )));
        }
        let kind = record
            .kind
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEACHER_KIND.to_string());
        teachers.push(Teacher::new(record.id.trim(), record.name.trim(), kind.trim()));
    }
    Ok(teachers)
}

/// Import room rows from a `ID,Name,Campus` file. All three columns are
/// required.
pub fn load_rooms_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Room>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rooms = Vec::new();
    for (row, record) in reader.deserialize::<RoomCsvRecord>().enumerate() {
        let record = record?;
        if record.id.trim().is_empty()
            || record.name.trim().is_empty()
            || record.campus.trim().is_empty()
        {
            return Err(PersistenceError::InvalidData(format!(
                "room row {} requires ID, Name and Campus",
                row + 1
            )));
        }
        rooms.push(Room::new(
            record.id.trim(),
            record.name.trim(),
            record.campus.trim(),
        ));
    }
    Ok(rooms)
}

#[derive(Debug, Serialize, Deserialize)]
struct ScheduleCsvRecord {
    #[serde(rename = "Class Code")]
    class_code: String,
    #[serde(rename = "Teacher Name")]
    teacher_name: String,
    #[serde(rename = "Room Name")]
    room_name: String,
    #[serde(rename = "Campus")]
    campus: String,
    #[serde(rename = "Start Time")]
    start: String,
    #[serde(rename = "End Time")]
    end: String,
}

impl From<&ScheduleRow> for ScheduleCsvRecord {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            class_code: row.class_code.clone(),
            teacher_name: row.teacher_name.clone(),
            room_name: row.room_name.clone(),
            campus: row.campus.clone(),
            start: format_datetime(row.start),
            end: format_datetime(row.end),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportCsvRecord {
    #[serde(rename = "Class Code")]
    class_code: String,
    #[serde(rename = "Teacher Name")]
    teacher_name: String,
    #[serde(rename = "Room Name")]
    room_name: String,
    #[serde(rename = "Campus")]
    campus: String,
    #[serde(rename = "Start Time")]
    start: String,
    #[serde(rename = "End Time")]
    end: String,
    #[serde(rename = "Hours")]
    hours: f64,
}

impl ReportCsvRecord {
    fn from_row(row: &ScheduleRow, hours: f64) -> Self {
        Self {
            class_code: row.class_code.clone(),
            teacher_name: row.teacher_name.clone(),
            room_name: row.room_name.clone(),
            campus: row.campus.clone(),
            start: format_datetime(row.start),
            end: format_datetime(row.end),
            hours,
        }
    }
}

/// Export the full schedule as the flat interchange contract:
/// `Class Code,Teacher Name,Room Name,Campus,Start Time,End Time`, UTF-8,
/// comma-delimited, `%Y-%m-%d %H:%M:%S` timestamps.
pub fn save_schedule_to_csv<P: AsRef<Path>>(
    timetable: &Timetable,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in timetable.rows()? {
        writer.serialize(ScheduleCsvRecord::from(&row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the schedule rows whose start date falls within the inclusive
/// range, with an extra `Hours` column per row.
pub fn save_report_to_csv<P: AsRef<Path>>(
    timetable: &Timetable,
    range_start: NaiveDate,
    range_end: NaiveDate,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in timetable.rows()? {
        let date = row.start.date();
        if date < range_start || date > range_end {
            continue;
        }
        let hours = (row.end - row.start).num_seconds() as f64 / 3600.0;
        writer.serialize(ReportCsvRecord::from_row(&row, hours))?;
    }
    writer.flush()?;
    Ok(())
}

/// Re-ingest an exported (and possibly hand-edited) schedule sheet as
/// master rows for [`Timetable::replace_all`]. The `Campus` column is
/// derived data and ignored; timestamps parse with or without seconds.
pub fn load_master_rows_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<MasterRow>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize::<ScheduleCsvRecord>() {
        let record = record?;
        rows.push(MasterRow {
            class_code: record.class_code,
            teacher_name: record.teacher_name,
            room_name: record.room_name,
            start: parse_datetime(&record.start)?,
            end: parse_datetime(&record.end)?,
        });
    }
    Ok(rows)
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn parse_datetime(input: &str) -> PersistenceResult<NaiveDateTime> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .map_err(|e| PersistenceError::InvalidData(format!("invalid timestamp '{input}': {e}")))
}
