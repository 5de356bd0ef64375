use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A committed class occurrence: one teacher in one room over one interval.
///
/// `class_code` is a display label and is not unique; identity is positional
/// within the schedule store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub class_code: String,
    pub teacher_id: String,
    pub room_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Assignment {
    pub fn new(
        class_code: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            class_code: class_code.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            start,
            end,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Exact elapsed duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}
