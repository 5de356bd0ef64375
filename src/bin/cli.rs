use chrono::{NaiveDate, NaiveTime, Weekday};
use std::io::{self, Write};
use std::str::FromStr;
use timetable_tool::{
    BatchRequest, Recurrence, Timetable, aggregate_range, load_master_rows_from_csv,
    load_rooms_from_csv, load_teachers_from_csv, save_schedule_to_csv,
};

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

fn parse_weekday_list(s: &str) -> Option<Vec<Weekday>> {
    s.split(',')
        .map(|part| Weekday::from_str(part.trim()).ok())
        .collect()
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  teachers <csv_path>                Load teacher list (ID,Name,Type)\n  rooms <csv_path>                   Load room list (ID,Name,Campus)\n  roster                             Show loaded teachers and rooms\n  show                               Show the current schedule\n  add <code> <teacher> <room> <YYYY-MM-DD> <HH:MM> <HH:MM>\n                                     Schedule a single class\n  monthly <code> <teacher> <room> <year> <month> <days_csv> <HH:MM> <HH:MM>\n                                     Schedule weekly classes for a month (days like Mon,Wed)\n  agenda teacher|room <id>           Show one teacher's or room's classes\n  report <YYYY-MM-DD> <YYYY-MM-DD>   Workload and occupancy totals for a range\n  export <csv_path>                  Export the schedule as CSV\n  replace <csv_path>                 Replace the schedule from an edited export\n  clear                              Remove every scheduled class\n  quit|exit                          Exit"
    );
}

fn print_schedule(timetable: &Timetable) {
    match timetable.rows() {
        Ok(rows) if rows.is_empty() => println!("Schedule is empty."),
        Ok(rows) => {
            let table: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.class_code.clone(),
                        r.teacher_name.clone(),
                        r.room_name.clone(),
                        r.campus.clone(),
                        r.start.format("%Y-%m-%d %H:%M").to_string(),
                        r.end.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                })
                .collect();
            print!(
                "{}",
                render_text_table(
                    &["Class Code", "Teacher", "Room", "Campus", "Start", "End"],
                    &table
                )
            );
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn print_roster(timetable: &Timetable) {
    let roster = timetable.roster();
    if roster.is_empty() {
        println!("No teachers or rooms loaded.");
        return;
    }
    let teachers: Vec<Vec<String>> = roster
        .teachers()
        .iter()
        .map(|t| vec![t.id.clone(), t.name.clone(), t.kind.clone()])
        .collect();
    print!("{}", render_text_table(&["ID", "Name", "Type"], &teachers));
    let rooms: Vec<Vec<String>> = roster
        .rooms()
        .iter()
        .map(|r| vec![r.id.clone(), r.name.clone(), r.campus.clone()])
        .collect();
    print!("{}", render_text_table(&["ID", "Name", "Campus"], &rooms));
}

fn run_batch(timetable: &mut Timetable, request: &BatchRequest) {
    match timetable.schedule_batch(request) {
        Ok(outcome) => {
            if !outcome.accepted.is_empty() {
                println!(
                    "Added {} classes for {}.",
                    outcome.accepted.len(),
                    request.class_code
                );
            }
            if !outcome.rejected.is_empty() {
                println!("Conflicts found on {} dates.", outcome.rejected.len());
                for rejection in &outcome.rejected {
                    println!("  {}: {}", rejection.date.format("%b %d"), rejection.reason);
                }
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    let mut timetable = Timetable::new();

    println!("Timetable Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "teachers" => match parts.next() {
                Some(path) => match load_teachers_from_csv(path) {
                    Ok(teachers) => {
                        println!("Loaded {} teachers.", teachers.len());
                        timetable.roster_mut().set_teachers(teachers);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: teachers <csv_path>"),
            },
            "rooms" => match parts.next() {
                Some(path) => match load_rooms_from_csv(path) {
                    Ok(rooms) => {
                        println!("Loaded {} rooms.", rooms.len());
                        timetable.roster_mut().set_rooms(rooms);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: rooms <csv_path>"),
            },
            "roster" => print_roster(&timetable),
            "show" => print_schedule(&timetable),
            "add" => {
                let args: Vec<&str> = parts.collect();
                if args.len() != 6 {
                    println!("Usage: add <code> <teacher> <room> <YYYY-MM-DD> <HH:MM> <HH:MM>");
                    continue;
                }
                let Some(date) = parse_date(args[3]) else {
                    println!("Invalid date (YYYY-MM-DD)");
                    continue;
                };
                let (Some(start_time), Some(end_time)) = (parse_time(args[4]), parse_time(args[5]))
                else {
                    println!("Invalid time (HH:MM)");
                    continue;
                };
                let request = BatchRequest {
                    class_code: args[0].to_string(),
                    teacher_id: args[1].to_string(),
                    room_id: args[2].to_string(),
                    start_time,
                    end_time,
                    recurrence: Recurrence::Single { date },
                };
                run_batch(&mut timetable, &request);
            }
            "monthly" => {
                let args: Vec<&str> = parts.collect();
                if args.len() != 8 {
                    println!(
                        "Usage: monthly <code> <teacher> <room> <year> <month> <days_csv> <HH:MM> <HH:MM>"
                    );
                    continue;
                }
                let (Ok(year), Ok(month)) = (args[3].parse::<i32>(), args[4].parse::<u32>())
                else {
                    println!("Invalid year/month");
                    continue;
                };
                let Some(weekdays) = parse_weekday_list(args[5]) else {
                    println!("Invalid weekday list (e.g. Mon,Wed)");
                    continue;
                };
                let (Some(start_time), Some(end_time)) = (parse_time(args[6]), parse_time(args[7]))
                else {
                    println!("Invalid time (HH:MM)");
                    continue;
                };
                let request = BatchRequest {
                    class_code: args[0].to_string(),
                    teacher_id: args[1].to_string(),
                    room_id: args[2].to_string(),
                    start_time,
                    end_time,
                    recurrence: Recurrence::Weekly {
                        year,
                        month,
                        weekdays,
                    },
                };
                run_batch(&mut timetable, &request);
            }
            "agenda" => {
                let mode = parts.next();
                let id = parts.next();
                match (mode, id) {
                    (Some("teacher"), Some(id)) => {
                        let entries = timetable.assignments_for_teacher(id);
                        if entries.is_empty() {
                            println!("No classes for teacher {}.", id);
                        }
                        for a in entries {
                            println!(
                                "  [{}] {} {} - {}",
                                a.class_code,
                                a.room_id,
                                a.start.format("%Y-%m-%d %H:%M"),
                                a.end.format("%H:%M")
                            );
                        }
                    }
                    (Some("room"), Some(id)) => {
                        let entries = timetable.assignments_for_room(id);
                        if entries.is_empty() {
                            println!("No classes in room {}.", id);
                        }
                        for a in entries {
                            println!(
                                "  [{}] {} {} - {}",
                                a.class_code,
                                a.teacher_id,
                                a.start.format("%Y-%m-%d %H:%M"),
                                a.end.format("%H:%M")
                            );
                        }
                    }
                    _ => println!("Usage: agenda teacher|room <id>"),
                }
            }
            "report" => {
                let start_s = parts.next();
                let end_s = parts.next();
                match (start_s.and_then(parse_date), end_s.and_then(parse_date)) {
                    (Some(start), Some(end)) => match aggregate_range(&timetable, start, end) {
                        Ok(report) => {
                            if report.teachers.is_empty() && report.rooms.is_empty() {
                                println!("No data found for this range.");
                                continue;
                            }
                            println!("Teacher workload:");
                            let teachers: Vec<Vec<String>> = report
                                .teachers
                                .iter()
                                .map(|t| {
                                    vec![
                                        t.name.clone(),
                                        t.kind.clone(),
                                        format!("{:.2}", t.hours),
                                    ]
                                })
                                .collect();
                            print!("{}", render_text_table(&["Name", "Type", "Hrs"], &teachers));
                            println!("Room occupancy:");
                            let rooms: Vec<Vec<String>> = report
                                .rooms
                                .iter()
                                .map(|r| {
                                    vec![
                                        r.name.clone(),
                                        r.campus.clone(),
                                        format!("{:.2}", r.hours),
                                    ]
                                })
                                .collect();
                            print!("{}", render_text_table(&["Name", "Campus", "Hrs"], &rooms));
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    _ => println!("Usage: report <YYYY-MM-DD> <YYYY-MM-DD>"),
                }
            }
            "export" => match parts.next() {
                Some(path) => match save_schedule_to_csv(&timetable, path) {
                    Ok(()) => println!("Schedule exported to {}.", path),
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: export <csv_path>"),
            },
            "replace" => match parts.next() {
                Some(path) => match load_master_rows_from_csv(path) {
                    Ok(rows) => {
                        let summary = timetable.replace_all(rows);
                        println!("Schedule updated ({}).", summary.to_cli_summary());
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: replace <csv_path>"),
            },
            "clear" => {
                timetable.clear();
                println!("Schedule cleared.");
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
