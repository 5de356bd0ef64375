use chrono::{NaiveDate, NaiveTime};
use timetable_tool::{
    BatchRequest, Recurrence, Room, Roster, Teacher, Timetable, aggregate_range,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_timetable() -> Timetable {
    Timetable::with_roster(Roster::from_parts(
        vec![
            Teacher::new("T1", "Ada Lin", "Full-time"),
            Teacher::new("T2", "Ben Ortiz", "Part-time"),
        ],
        vec![
            Room::new("R1", "Lab A", "North"),
            Room::new("R2", "Studio B", "South"),
        ],
    ))
}

fn add(
    timetable: &mut Timetable,
    code: &str,
    teacher: &str,
    room: &str,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) {
    let outcome = timetable
        .schedule_batch(&BatchRequest {
            class_code: code.into(),
            teacher_id: teacher.into(),
            room_id: room.into(),
            start_time: start,
            end_time: end,
            recurrence: Recurrence::Single { date },
        })
        .unwrap();
    assert_eq!(outcome.accepted.len(), 1, "fixture class must not conflict");
}

#[test]
fn empty_schedule_yields_empty_summaries() {
    let timetable = sample_timetable();
    let report = aggregate_range(&timetable, d(2026, 3, 1), d(2026, 3, 31)).unwrap();
    assert!(report.teachers.is_empty());
    assert!(report.rooms.is_empty());
}

#[test]
fn hours_sum_per_teacher_and_room_with_fractions() {
    let mut timetable = sample_timetable();
    add(&mut timetable, "MATH101", "T1", "R1", d(2026, 3, 2), t(9, 0), t(10, 0));
    add(&mut timetable, "MATH102", "T1", "R2", d(2026, 3, 3), t(13, 0), t(14, 30));
    add(&mut timetable, "SCI201", "T2", "R1", d(2026, 3, 4), t(11, 0), t(12, 0));

    let report = aggregate_range(&timetable, d(2026, 3, 1), d(2026, 3, 31)).unwrap();

    assert_eq!(report.teachers.len(), 2);
    assert_eq!(report.teachers[0].name, "Ada Lin");
    assert_eq!(report.teachers[0].kind, "Full-time");
    assert_eq!(report.teachers[0].hours, 2.5);
    assert_eq!(report.teachers[1].name, "Ben Ortiz");
    assert_eq!(report.teachers[1].hours, 1.0);

    assert_eq!(report.rooms.len(), 2);
    assert_eq!(report.rooms[0].name, "Lab A");
    assert_eq!(report.rooms[0].campus, "North");
    assert_eq!(report.rooms[0].hours, 2.0);
    assert_eq!(report.rooms[1].name, "Studio B");
    assert_eq!(report.rooms[1].hours, 1.5);
}

#[test]
fn summaries_sort_by_hours_descending() {
    let mut timetable = sample_timetable();
    add(&mut timetable, "MATH101", "T1", "R1", d(2026, 3, 2), t(9, 0), t(10, 0));
    add(&mut timetable, "SCI201", "T2", "R2", d(2026, 3, 2), t(9, 0), t(12, 0));

    let report = aggregate_range(&timetable, d(2026, 3, 1), d(2026, 3, 31)).unwrap();
    assert_eq!(report.teachers[0].teacher_id, "T2");
    assert_eq!(report.teachers[1].teacher_id, "T1");
    assert_eq!(report.rooms[0].room_id, "R2");
}

#[test]
fn range_bounds_are_inclusive_on_both_ends() {
    let mut timetable = sample_timetable();
    add(&mut timetable, "MATH101", "T1", "R1", d(2026, 3, 1), t(9, 0), t(10, 0));
    add(&mut timetable, "MATH102", "T1", "R1", d(2026, 3, 15), t(9, 0), t(10, 0));
    add(&mut timetable, "MATH103", "T1", "R1", d(2026, 3, 31), t(9, 0), t(10, 0));
    add(&mut timetable, "MATH104", "T1", "R1", d(2026, 4, 1), t(9, 0), t(10, 0));

    let report = aggregate_range(&timetable, d(2026, 3, 1), d(2026, 3, 31)).unwrap();
    assert_eq!(report.teachers.len(), 1);
    assert_eq!(report.teachers[0].hours, 3.0);

    let report = aggregate_range(&timetable, d(2026, 3, 2), d(2026, 3, 30)).unwrap();
    assert_eq!(report.teachers[0].hours, 1.0);
}

#[test]
fn range_with_no_matches_is_empty_not_an_error() {
    let mut timetable = sample_timetable();
    add(&mut timetable, "MATH101", "T1", "R1", d(2026, 3, 2), t(9, 0), t(10, 0));

    let report = aggregate_range(&timetable, d(2026, 6, 1), d(2026, 6, 30)).unwrap();
    assert!(report.teachers.is_empty());
    assert!(report.rooms.is_empty());
}
