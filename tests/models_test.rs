use center_admin::error::AppError;
use center_admin::models::staff::role_key_slug;
use center_admin::models::{
    ClassPayload, Listing, NewParent, RolePayload, SessionAssignment, ShiftPayload, ShiftRangeAssignment, Staff,
    StudentPayload, StudentReport, StudentReportPayload,
};
use center_admin::models::report::{PdfFilePayload, ScratchProject};
use center_admin::qr::QrSubject;
use chrono::NaiveDate;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn validation_message(result: Result<(), AppError>) -> String {
    match result {
        Err(AppError::Validation(msg)) => msg,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_role_keys_are_slugified() {
    assert_eq!(role_key_slug("Giáo viên Chính"), "giao-vien-chinh");
    assert_eq!(role_key_slug("Trợ   giảng"), "tro-giang");
    assert_eq!(role_key_slug("Đào tạo #1"), "dao-tao-1");
    assert_eq!(RolePayload::new("  Teacher ", "Teacher").key, "teacher");
    assert!(RolePayload::new("Teacher", "!!!").validate().is_err());
}

#[test]
fn test_class_schedule_requires_every_field_once_started() {
    let without_schedule = ClassPayload {
        class_name: "Robotics".to_string(),
        class_code: "RB".to_string(),
        ..ClassPayload::default()
    };
    assert!(without_schedule.validate().is_ok());

    let partial = ClassPayload {
        total_sessions: Some(12),
        ..without_schedule.clone()
    };
    let msg = validation_message(partial.validate());
    assert!(msg.contains("Choose at least one day of the week."));
    assert!(msg.contains("Class time is required."));

    let complete = ClassPayload {
        start_date: Some(date(2024, 9, 2)),
        total_sessions: Some(12),
        schedule_days: Some(vec!["Monday".to_string(), "Thursday".to_string()]),
        schedule_time: Some("17:30".to_string()),
        ..without_schedule.clone()
    };
    assert!(complete.validate().is_ok());

    let bad_day = ClassPayload {
        schedule_days: Some(vec!["Funday".to_string()]),
        ..complete
    };
    assert!(validation_message(bad_day.validate()).contains("Funday"));
}

#[test]
fn test_student_needs_name_birth_date_and_gender() {
    let today = date(2024, 5, 1);
    let student = StudentPayload::new("Nguyễn Văn An", date(2015, 6, 1), "Nam", today);
    assert_eq!(student.age, Some(8));
    assert!(student.validate().is_ok());

    let missing = StudentPayload::default();
    let msg = validation_message(missing.validate());
    assert!(msg.contains("Full name is required."));
    assert!(msg.contains("Date of birth is required."));
    assert!(msg.contains("Gender is required."));
}

#[test]
fn test_new_parent_phone_and_email() {
    let valid = NewParent {
        full_name: "Trần Thị Bình".to_string(),
        phone_number: "0912345678".to_string(),
        email: Some("binh@example.com".to_string()),
        ..NewParent::default()
    };
    assert!(valid.validate().is_ok());

    let short_phone = NewParent {
        phone_number: "09123".to_string(),
        ..valid.clone()
    };
    assert!(validation_message(short_phone.validate()).contains("10 or 11 digits"));

    let bad_email = NewParent {
        email: Some("binh@".to_string()),
        ..valid.clone()
    };
    assert!(validation_message(bad_email.validate()).contains("email"));

    let student = StudentPayload {
        new_parent: Some(NewParent::default()),
        ..StudentPayload::new("An", date(2015, 6, 1), "Nam", date(2024, 5, 1))
    };
    assert!(validation_message(student.validate()).contains("Parent name is required."));
}

#[test]
fn test_shift_validation() {
    let shift = ShiftPayload {
        name: "Morning".to_string(),
        start_time: "08:00".to_string(),
        end_time: "12:00".to_string(),
        ..ShiftPayload::default()
    };
    assert!(shift.validate().is_ok());
    assert_eq!(shift.ot_multiplier, 1.5);

    let backwards = ShiftPayload {
        start_time: "13:00".to_string(),
        ..shift.clone()
    };
    assert!(backwards.validate().is_err());

    let zero_multiplier = ShiftPayload {
        ot_multiplier: 0.0,
        ..shift
    };
    assert!(zero_multiplier.validate().is_err());
}

#[test]
fn test_shift_range_days_and_dates() {
    let range = ShiftRangeAssignment {
        staff_id: 2,
        shift_id: 9,
        from_date: date(2024, 5, 1),
        to_date: date(2024, 5, 31),
        days_of_week: vec![1, 3, 5],
    };
    assert!(range.validate().is_ok());
    assert_eq!(
        serde_json::to_value(&range).unwrap(),
        json!({ "staffId": 2, "shiftId": 9, "fromDate": "2024-05-01", "toDate": "2024-05-31", "daysOfWeek": [1, 3, 5] })
    );

    let no_days = ShiftRangeAssignment {
        days_of_week: vec![],
        ..range.clone()
    };
    assert!(no_days.validate().is_err());

    let reversed = ShiftRangeAssignment {
        from_date: date(2024, 6, 1),
        ..range.clone()
    };
    assert!(reversed.validate().is_err());

    let bad_day = ShiftRangeAssignment {
        days_of_week: vec![7],
        ..range
    };
    assert!(bad_day.validate().is_err());
}

#[test]
fn test_incomplete_session_rows_are_dropped() {
    let assignment = SessionAssignment::from_rows(
        10,
        vec![
            (Some(1), Some("teacher".to_string())),
            (None, Some("assistant".to_string())),
            (Some(3), Some(" ".to_string())),
            (Some(4), None),
            (Some(5), Some("assistant".to_string())),
        ],
    );

    assert_eq!(
        serde_json::to_value(&assignment).unwrap(),
        json!({
            "classSessionId": 10,
            "assignments": [
                { "staffId": 1, "roleKey": "teacher" },
                { "staffId": 5, "roleKey": "assistant" }
            ]
        })
    );
}

#[test]
fn test_report_payload_drops_blank_rows() {
    let payload = StudentReportPayload {
        student_id: 1,
        class_id: 2,
        pdf_files: vec![
            PdfFilePayload {
                file_url: "https://files.example.com/a.pdf".to_string(),
                test_type: "midterm".to_string(),
                score: Some(8.5),
                ..PdfFilePayload::default()
            },
            PdfFilePayload::default(),
        ],
        youtube_links: vec!["https://youtu.be/x".to_string(), "  ".to_string()],
        scratch_projects: vec![ScratchProject::default()],
    }
    .normalized();

    assert_eq!(payload.pdf_files.len(), 1);
    assert_eq!(payload.youtube_links.len(), 1);
    assert!(payload.scratch_projects.is_empty());
    assert!(payload.validate().is_ok());
    assert!(StudentReportPayload::default().validate().is_err());
}

#[test]
fn test_report_share_url() {
    let report: StudentReport = serde_json::from_value(json!({
        "id": 1,
        "accessToken": "abc123",
        "links": [{ "type": "SCRATCH_EMBED", "embedCode": "<iframe></iframe>" }]
    }))
    .unwrap();

    assert_eq!(
        report.share_url().as_deref(),
        Some("https://codespace.edu.vn/student-reports/abc123")
    );
}

#[test]
fn test_staff_rates_accept_strings_and_numbers() {
    let staff: Staff = serde_json::from_value(json!({
        "id": 1,
        "fullName": "Lan",
        "rates": { "teacher": "150000.00", "assistant": 80000 }
    }))
    .unwrap();
    assert_eq!(staff.rate_for("teacher"), Some(150000.0));
    assert_eq!(staff.rate_for("assistant"), Some(80000.0));
    assert!(!staff.is_fixed_salary());

    let salaried: Staff = serde_json::from_value(json!({ "id": 2, "fullName": "Hoa", "rates": null })).unwrap();
    assert!(salaried.is_fixed_salary());
}

#[test]
fn test_list_responses_in_both_shapes() {
    let bare: Listing<Staff> = serde_json::from_value(json!([{ "id": 1, "fullName": "Lan" }])).unwrap();
    let paged: Listing<Staff> =
        serde_json::from_value(json!({ "data": [{ "id": 1, "fullName": "Lan" }], "total": 31 })).unwrap();

    assert_eq!(bare.into_paged().total, Some(1));
    let paged = paged.into_paged();
    assert_eq!(paged.total, Some(31));
    assert_eq!(paged.data.len(), 1);
}

#[test]
fn test_qr_payloads() {
    assert_eq!(QrSubject::Student(42).payload(), "student_id:42");
    assert_eq!(QrSubject::Staff(7).to_string(), "staff_id:7");
    assert_eq!(QrSubject::parse(" staff_id:7 ").unwrap(), QrSubject::Staff(7));
    assert_eq!("student_id:42".parse::<QrSubject>().unwrap(), QrSubject::Student(42));

    for bad in ["", "staff_id:", "staff_id:abc", "teacher_id:1", "student_id:-3"] {
        assert!(QrSubject::parse(bad).is_err(), "accepted {:?}", bad);
    }
}
