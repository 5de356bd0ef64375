use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use timetable_tool::{
    BatchRequest, MasterRow, Recurrence, Room, Roster, Teacher, Timetable,
};

fn dt(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
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

fn master_row(code: &str, teacher: &str, room: &str, start: NaiveDateTime, end: NaiveDateTime) -> MasterRow {
    MasterRow {
        class_code: code.into(),
        teacher_name: teacher.into(),
        room_name: room.into(),
        start,
        end,
    }
}

#[test]
fn replace_all_resolves_display_names_to_ids() {
    let mut timetable = sample_timetable();
    let summary = timetable.replace_all(vec![
        master_row("MATH101", "Ada Lin", "Lab A", dt(2, 9, 0), dt(2, 10, 0)),
        master_row("SCI201", "Ben Ortiz", "Studio B", dt(2, 11, 0), dt(2, 12, 0)),
    ]);

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.dropped, 0);
    assert_eq!(timetable.assignments()[0].teacher_id, "T1");
    assert_eq!(timetable.assignments()[0].room_id, "R1");
    assert_eq!(timetable.assignments()[1].teacher_id, "T2");
}

#[test]
fn replace_all_drops_unresolvable_rows_and_counts_them() {
    let mut timetable = sample_timetable();
    let summary = timetable.replace_all(vec![
        master_row("MATH101", "Ada Lin", "Lab A", dt(2, 9, 0), dt(2, 10, 0)),
        master_row("GHOST", "Nobody", "Lab A", dt(2, 11, 0), dt(2, 12, 0)),
        master_row("BLANK", "", "Studio B", dt(2, 13, 0), dt(2, 14, 0)),
        master_row("NOROOM", "Ben Ortiz", "Broom Closet", dt(2, 15, 0), dt(2, 16, 0)),
    ]);

    assert_eq!(summary.saved, 1);
    assert_eq!(summary.dropped, 3);
    assert_eq!(summary.to_cli_summary(), "saved=1, dropped=3");
    assert_eq!(timetable.assignments().len(), 1);
}

#[test]
fn replace_all_drops_rows_with_inverted_intervals() {
    let mut timetable = sample_timetable();
    let summary = timetable.replace_all(vec![master_row(
        "MATH101",
        "Ada Lin",
        "Lab A",
        dt(2, 10, 0),
        dt(2, 9, 0),
    )]);

    assert_eq!(summary.saved, 0);
    assert_eq!(summary.dropped, 1);
    assert!(timetable.assignments().is_empty());
}

#[test]
fn replace_all_is_a_trusted_overwrite_without_conflict_checks() {
    let mut timetable = sample_timetable();
    // Two overlapping classes for the same teacher: the editor path saves
    // both; only the batch scheduler enforces the conflict rules.
    let summary = timetable.replace_all(vec![
        master_row("MATH101", "Ada Lin", "Lab A", dt(2, 9, 0), dt(2, 10, 0)),
        master_row("MATH102", "Ada Lin", "Studio B", dt(2, 9, 30), dt(2, 10, 30)),
    ]);

    assert_eq!(summary.saved, 2);
    assert_eq!(timetable.assignments().len(), 2);
}

#[test]
fn replace_all_discards_the_previous_store() {
    let mut timetable = sample_timetable();
    timetable
        .schedule_batch(&BatchRequest {
            class_code: "OLD".into(),
            teacher_id: "T1".into(),
            room_id: "R1".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            recurrence: Recurrence::Single {
                date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            },
        })
        .unwrap();

    timetable.replace_all(vec![master_row(
        "NEW",
        "Ben Ortiz",
        "Studio B",
        dt(9, 9, 0),
        dt(9, 10, 0),
    )]);

    assert_eq!(timetable.assignments().len(), 1);
    assert_eq!(timetable.assignments()[0].class_code, "NEW");
}

#[test]
fn clear_empties_the_store_but_keeps_the_roster() {
    let mut timetable = sample_timetable();
    timetable.replace_all(vec![master_row(
        "MATH101",
        "Ada Lin",
        "Lab A",
        dt(2, 9, 0),
        dt(2, 10, 0),
    )]);

    timetable.clear();
    assert!(timetable.assignments().is_empty());
    assert_eq!(timetable.roster().teachers().len(), 2);
}

#[test]
fn agenda_filters_by_teacher_and_by_room() {
    let mut timetable = sample_timetable();
    timetable.replace_all(vec![
        master_row("MATH101", "Ada Lin", "Lab A", dt(2, 9, 0), dt(2, 10, 0)),
        master_row("SCI201", "Ben Ortiz", "Lab A", dt(2, 11, 0), dt(2, 12, 0)),
        master_row("ART301", "Ada Lin", "Studio B", dt(3, 9, 0), dt(3, 10, 0)),
    ]);

    let t1 = timetable.assignments_for_teacher("T1");
    assert_eq!(t1.len(), 2);
    assert!(t1.iter().all(|a| a.teacher_id == "T1"));

    let r1 = timetable.assignments_for_room("R1");
    assert_eq!(r1.len(), 2);
    assert!(r1.iter().all(|a| a.room_id == "R1"));
}

#[test]
fn check_probe_reports_without_mutating() {
    let mut timetable = sample_timetable();
    timetable.replace_all(vec![master_row(
        "MATH101",
        "Ada Lin",
        "Lab A",
        dt(2, 9, 0),
        dt(2, 10, 0),
    )]);

    let candidate = timetable_tool::Assignment::new("PROBE", "T1", "R1", dt(2, 9, 30), dt(2, 10, 30));
    assert!(timetable.check(&candidate).unwrap().is_some());
    assert_eq!(timetable.assignments().len(), 1);
}

#[test]
fn rows_join_names_and_campus_in_store_order() {
    let mut timetable = sample_timetable();
    timetable.replace_all(vec![
        master_row("MATH101", "Ada Lin", "Lab A", dt(2, 9, 0), dt(2, 10, 0)),
        master_row("SCI201", "Ben Ortiz", "Studio B", dt(2, 11, 0), dt(2, 12, 0)),
    ]);

    let rows = timetable.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].class_code, "MATH101");
    assert_eq!(rows[0].teacher_name, "Ada Lin");
    assert_eq!(rows[0].room_name, "Lab A");
    assert_eq!(rows[0].campus, "North");
    assert_eq!(rows[1].campus, "South");
}
