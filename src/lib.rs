pub mod assignment;
pub(crate) mod assignment_validation;
pub mod conflict;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod recurrence;
pub mod report;
pub mod roster;
pub mod timetable;

pub use assignment::Assignment;
pub use conflict::{Conflict, ConflictKind, TRAVEL_BUFFER_MINUTES, check_conflicts};
pub use persistence::{
    PersistenceError, load_master_rows_from_csv, load_rooms_from_csv, load_teachers_from_csv,
    save_report_to_csv, save_schedule_to_csv,
};
pub use recurrence::Recurrence;
pub use report::{ReportError, RoomOccupancy, TeacherWorkload, WorkloadReport, aggregate_range};
pub use roster::{DEFAULT_TEACHER_KIND, LookupError, Room, Roster, Teacher};
pub use timetable::{
    BatchOutcome, BatchRequest, MasterRow, RejectedDate, ReplaceSummary, ScheduleRow, Timetable,
    TimetableError,
};
