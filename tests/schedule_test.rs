use center_admin::models::{ClassSession, StaffAttendance, StaffSchedule};
use center_admin::schedule::calendar::SESSION_LENGTH_MINUTES;
use center_admin::schedule::{
    EventKind, StaffColorMap, UNASSIGNED_COLOR, WeeklySchedule, summarize_day, week_bounds,
};
use chrono::{NaiveDate, TimeDelta};
use serde_json::{Value, json};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn session(id: i64, day: &str, start: &str) -> ClassSession {
    serde_json::from_value(json!({
        "id": id,
        "sessionDate": day,
        "startTime": start,
        "class": { "id": 1, "className": "Robotics A", "classCode": "RB-A" }
    }))
    .expect("session should deserialize")
}

fn session_assignment(id: i64, staff_id: i64, name: &str, session_id: i64, role: &str) -> StaffSchedule {
    serde_json::from_value(json!({
        "id": id,
        "staffId": staff_id,
        "staff": { "id": staff_id, "fullName": name },
        "classSessionId": session_id,
        "roleKey": role
    }))
    .expect("schedule should deserialize")
}

fn shift_assignment(id: i64, staff_id: i64, name: &str, day: &str, role: Option<&str>) -> StaffSchedule {
    let mut value = json!({
        "id": id,
        "staffId": staff_id,
        "staff": { "id": staff_id, "fullName": name },
        "date": day,
        "shiftId": 9,
        "shift": {
            "id": 9,
            "name": "Morning",
            "startTime": "08:00:00",
            "endTime": "12:00:00",
            "breakDuration": "00:15:00",
            "otMultiplier": "1.50"
        }
    });
    if let Some(role) = role {
        value["roleKey"] = Value::String(role.to_string());
    }
    serde_json::from_value(value).expect("schedule should deserialize")
}

#[test]
fn test_weeks_start_on_monday() {
    assert_eq!(week_bounds(date(2024, 5, 8)), (date(2024, 5, 6), date(2024, 5, 13)));
    assert_eq!(week_bounds(date(2024, 5, 12)), (date(2024, 5, 6), date(2024, 5, 13)));
    assert_eq!(week_bounds(date(2024, 5, 6)).0, date(2024, 5, 6));
}

#[test]
fn test_teacher_color_wins_regardless_of_order() {
    let assistant = session_assignment(1, 2, "Minh", 10, "assistant");
    let teacher = session_assignment(2, 1, "Lan", 10, "teacher");

    let mut colors = StaffColorMap::new();
    let first = colors.session_color(&[&assistant, &teacher]);
    let second = colors.session_color(&[&teacher, &assistant]);

    assert_eq!(Some(first.as_str()), colors.get(1));
    assert_eq!(first, second);
    assert_eq!(colors.len(), 2);
}

#[test]
fn test_assistant_only_and_unassigned_sessions() {
    let assistant = session_assignment(1, 2, "Minh", 10, "assistant");
    let mut colors = StaffColorMap::new();

    let color = colors.session_color(&[&assistant]);
    assert_eq!(Some(color.as_str()), colors.get(2));
    assert_ne!(color, UNASSIGNED_COLOR);

    assert_eq!(colors.session_color(&[]), UNASSIGNED_COLOR);
}

#[test]
fn test_colors_are_memoized_and_well_formed() {
    let mut colors = StaffColorMap::new();
    let first = colors.color_for(5).to_string();

    assert_eq!(colors.color_for(5), first);
    assert_eq!(first.len(), 7);
    assert!(first.starts_with('#'));
    assert!(first[1..].chars().all(|c| c.is_ascii_hexdigit()));

    colors.clear();
    assert!(colors.is_empty());
}

#[test]
fn test_calendar_events_for_sessions_and_shifts() {
    let sessions = vec![
        session(10, "2024-05-07T00:00:00.000Z", "17:30:00"),
        session(11, "2024-05-09", "09:00"),
    ];
    let schedules = vec![
        session_assignment(1, 1, "Lan", 10, "teacher"),
        session_assignment(2, 2, "Minh", 10, "assistant"),
        shift_assignment(3, 2, "Minh", "2024-05-08", None),
    ];

    let mut calendar = WeeklySchedule::new();
    calendar.refresh(&sessions, &schedules);
    let events = calendar.events();
    assert_eq!(events.len(), 3);

    let taught = &events[0];
    assert_eq!(taught.title, "Robotics A - Lan (teacher), Minh (assistant)");
    assert_eq!(taught.start, date(2024, 5, 7).and_hms_opt(17, 30, 0).unwrap());
    assert_eq!(taught.end - taught.start, TimeDelta::minutes(SESSION_LENGTH_MINUTES));
    assert_eq!(Some(taught.color.as_str()), calendar.colors().get(1));
    assert_eq!(
        taught.kind,
        EventKind::ClassSession {
            session_id: 10,
            schedule_ids: vec![1, 2]
        }
    );

    let empty = &events[1];
    assert_eq!(empty.title, "Robotics A - Chưa phân công");
    assert_eq!(empty.color, UNASSIGNED_COLOR);

    let shift = &events[2];
    assert_eq!(shift.title, "Minh - Ca: Morning");
    assert_eq!(shift.start, date(2024, 5, 8).and_hms_opt(8, 0, 0).unwrap());
    assert_eq!(shift.end, date(2024, 5, 8).and_hms_opt(12, 0, 0).unwrap());
    assert_eq!(Some(shift.color.as_str()), calendar.colors().get(2));
}

#[test]
fn test_events_in_week_are_sorted_and_bounded() {
    let sessions = vec![
        session(12, "2024-05-10", "08:00"),
        session(10, "2024-05-06", "18:00"),
        session(11, "2024-05-13", "08:00"),
    ];

    let mut calendar = WeeklySchedule::new();
    calendar.refresh(&sessions, &[]);

    let week: Vec<&str> = calendar
        .events_in_week(date(2024, 5, 8))
        .iter()
        .map(|e| match &e.kind {
            EventKind::ClassSession { session_id, .. } if *session_id == 10 => "mon",
            EventKind::ClassSession { session_id, .. } if *session_id == 12 => "fri",
            _ => "other",
        })
        .collect();
    assert_eq!(week, vec!["mon", "fri"]);
}

#[test]
fn test_unreadable_session_dates_are_skipped() {
    let sessions = vec![session(10, "not a date", "08:00"), session(11, "2024-05-09", "25:99")];

    let mut calendar = WeeklySchedule::new();
    calendar.refresh(&sessions, &[]);

    assert!(calendar.events().is_empty());
}

#[test]
fn test_refresh_rebuilds_color_map() {
    let schedules = vec![session_assignment(1, 1, "Lan", 10, "teacher")];
    let sessions = vec![session(10, "2024-05-07", "17:30")];

    let mut calendar = WeeklySchedule::new();
    calendar.colors_mut().color_for(99);
    calendar.refresh(&sessions, &schedules);

    assert!(calendar.colors().get(99).is_none());
    assert_eq!(calendar.colors().len(), 1);
}

fn attendance(id: i64, at: &str, kind: &str) -> StaffAttendance {
    serde_json::from_value(json!({ "id": id, "staffId": 2, "timestamp": at, "type": kind }))
        .expect("attendance should deserialize")
}

#[test]
fn test_day_summary_uses_earliest_check_in_and_latest_check_out() {
    let attendances = vec![
        attendance(3, "2024-05-08T10:30:00Z", "check-out"),
        attendance(1, "2024-05-08T01:15:00Z", "check-in"),
        attendance(4, "2024-05-08T12:05:00Z", "check-out"),
        attendance(2, "2024-05-08T05:00:00Z", "check-in"),
    ];

    let summary = summarize_day(&attendances, &[]);

    assert_eq!(summary.check_in_out(), "08:15:00 - 19:05:00");
    assert!(!summary.needs_split());
}

#[test]
fn test_day_summary_marks_missing_sides() {
    let only_in = vec![attendance(1, "2024-05-08T01:00:00Z", "check-in")];

    assert_eq!(summarize_day(&only_in, &[]).check_in_out(), "08:00:00 - ??:??");
    assert_eq!(summarize_day(&[], &[]).check_in_out(), "N/A");
}

#[test]
fn test_day_summary_role_keys_and_lines() {
    let mut taught = session_assignment(1, 2, "Minh", 10, "teacher");
    taught.class_session = Some(session(10, "2024-05-08", "17:30:00"));
    let schedules = vec![
        taught,
        shift_assignment(2, 2, "Minh", "2024-05-08", None),
        shift_assignment(3, 2, "Minh", "2024-05-08", Some("teacher")),
    ];

    let summary = summarize_day(&[], &schedules);

    assert_eq!(summary.role_keys, vec!["teacher".to_string(), "part-time".to_string()]);
    assert!(summary.needs_split());
    assert_eq!(
        summary.assignment_lines,
        vec![
            "[teacher] Robotics A (17:30:00)".to_string(),
            "[part-time] Morning (08:00:00 - 12:00:00)".to_string(),
            "[teacher] Morning (08:00:00 - 12:00:00)".to_string(),
        ]
    );
}
