use center_admin::format::{
    DurationParts, DurationStyle, DurationValue, FORMAT_ERROR, NOT_AVAILABLE, age_on, format_clock_vn, format_date, format_duration,
    format_vnd, parse_display,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

fn duration(value: serde_json::Value) -> DurationValue {
    serde_json::from_value(value).expect("duration should deserialize")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_interval_object_renders_in_both_styles() {
    let value = duration(json!({ "hours": 2, "minutes": 15, "seconds": 40 }));

    assert_eq!(format_duration(Some(&value), DurationStyle::Long), "2 giờ 15 phút");
    assert_eq!(format_duration(Some(&value), DurationStyle::Compact), "2h 15p");
}

#[test]
fn test_interval_object_with_missing_fields_counts_them_as_zero() {
    let value = duration(json!({ "minutes": 45 }));

    assert_eq!(format_duration(Some(&value), DurationStyle::Long), "0 giờ 45 phút");
}

#[test]
fn test_clock_string_drops_seconds() {
    let value = duration(json!("01:05:59"));

    assert_eq!(format_duration(Some(&value), DurationStyle::Long), "1 giờ 5 phút");
    assert_eq!(value.total_minutes(), Some(65));
}

#[test]
fn test_malformed_or_missing_values_use_sentinels() {
    let garbage = duration(json!("ab:cd"));
    let blank = duration(json!(""));

    assert_eq!(format_duration(Some(&garbage), DurationStyle::Long), FORMAT_ERROR);
    assert_eq!(format_duration(Some(&blank), DurationStyle::Long), NOT_AVAILABLE);
    assert_eq!(format_duration(None, DurationStyle::Compact), NOT_AVAILABLE);
    assert_eq!(garbage.total_minutes(), None);
}

#[test]
fn test_breakdown_joins_segments() {
    let value = duration(json!([
        { "roleKey": "teacher", "duration": { "hours": 1, "minutes": 30 }, "multiplier": "1.5" },
        { "roleKey": "part-time", "duration": "00:45:00" }
    ]));

    assert_eq!(
        format_duration(Some(&value), DurationStyle::Long),
        "teacher: 1 giờ 30 phút (x1.5), part-time: 0 giờ 45 phút (x1)"
    );
    assert_eq!(value.total_minutes(), Some(135));
}

#[test]
fn test_empty_breakdown_is_not_available() {
    let value = duration(json!([]));

    assert_eq!(format_duration(Some(&value), DurationStyle::Long), NOT_AVAILABLE);
}

#[test]
fn test_rendered_durations_read_back() {
    for hours in 0..=23 {
        for minutes in 0..=59 {
            let value = DurationValue::Parts(DurationParts::new(hours, minutes));
            for style in [DurationStyle::Long, DurationStyle::Compact] {
                let text = format_duration(Some(&value), style);
                assert_eq!(parse_display(&text), Some((hours, minutes)), "failed on {}", text);
            }
        }
    }
    assert_eq!(parse_display(&DurationStyle::Long.render(100, 1)), Some((100, 1)));
    assert_eq!(parse_display("two hours"), None);
}

#[test]
fn test_oversized_duration_has_no_minute_total() {
    let text = DurationValue::Text("80000000:00".to_string());
    let parts = DurationValue::Parts(DurationParts::new(u32::MAX, 0));

    assert_eq!(text.total_minutes(), None);
    assert_eq!(parts.total_minutes(), None);
    assert_eq!(format_duration(Some(&text), DurationStyle::Compact), "80000000h 0p");
}

#[test]
fn test_age_counts_birthday_only_once_reached() {
    let birth = date(2010, 6, 15);

    assert_eq!(age_on(birth, date(2024, 6, 14)), 13);
    assert_eq!(age_on(birth, date(2024, 6, 15)), 14);
    assert_eq!(age_on(birth, date(2024, 12, 31)), 14);
}

#[test]
fn test_leap_day_birthday_in_common_year() {
    let birth = date(2012, 2, 29);

    assert_eq!(age_on(birth, date(2023, 2, 28)), 10);
    assert_eq!(age_on(birth, date(2023, 3, 1)), 11);
    assert_eq!(age_on(birth, date(2024, 2, 29)), 12);
}

#[test]
fn test_clock_is_shown_in_vietnam_time() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 1, 2, 3).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();

    assert_eq!(format_clock_vn(&timestamp), "08:02:03");
    assert_eq!(format_clock_vn(&late), "03:00:00");
}

#[test]
fn test_dates_and_money() {
    assert_eq!(format_date("2024-03-05T00:00:00.000Z"), "05/03/2024");
    assert_eq!(format_date("2024-03-05"), "05/03/2024");
    assert_eq!(format_date("soon"), "soon");

    assert_eq!(format_vnd(1_500_000.0), "1.500.000 ₫");
    assert_eq!(format_vnd(999.4), "999 ₫");
    assert_eq!(format_vnd(0.0), "0 ₫");
    assert_eq!(format_vnd(-25_000.0), "-25.000 ₫");
}
