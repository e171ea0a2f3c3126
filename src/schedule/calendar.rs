use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::warn;

use super::colors::StaffColorMap;
use crate::models::{ClassSession, StaffSchedule, parse_calendar_date, parse_clock};

pub const SESSION_LENGTH_MINUTES: i64 = 90;
const UNASSIGNED_LABEL: &str = "Chưa phân công";
const DEFAULT_CLASS_LABEL: &str = "Lớp học";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ClassSession { session_id: i64, schedule_ids: Vec<i64> },
    Shift { schedule_id: i64, shift_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub kind: EventKind,
}

/// Monday of the week containing `date`, and the Monday after it.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + TimeDelta::days(7))
}

/// Calendar blocks for class sessions and shift assignments, together with
/// the color map used to paint them.
#[derive(Debug, Default)]
pub struct WeeklySchedule {
    colors: StaffColorMap,
    events: Vec<CalendarEvent>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &StaffColorMap {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut StaffColorMap {
        &mut self.colors
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Rebuilds every event from freshly fetched data. Colors from the
    /// previous load are discarded.
    pub fn refresh(&mut self, sessions: &[ClassSession], schedules: &[StaffSchedule]) {
        self.colors.clear();
        self.events = build_events(sessions, schedules, &mut self.colors);
    }

    pub fn events_in_week(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let (start, end) = week_bounds(date);
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|e| e.start.date() >= start && e.start.date() < end)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }
}

pub fn build_events(
    sessions: &[ClassSession],
    schedules: &[StaffSchedule],
    colors: &mut StaffColorMap,
) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(sessions.len() + schedules.len());

    for session in sessions {
        let Some(start) = combine(&session.session_date, &session.start_time) else {
            warn!("Skipping class session {} with unreadable date/time", session.id);
            continue;
        };

        let assignments: Vec<&StaffSchedule> = schedules
            .iter()
            .filter(|s| s.class_session_id == Some(session.id))
            .collect();

        let class_name = session
            .class
            .as_ref()
            .and_then(|c| c.class_name.as_deref())
            .unwrap_or(DEFAULT_CLASS_LABEL);

        let title = if assignments.is_empty() {
            format!("{} - {}", class_name, UNASSIGNED_LABEL)
        } else {
            let staff = assignments
                .iter()
                .map(|a| format!("{} ({})", a.staff_name(), a.role_key.as_deref().unwrap_or("")))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} - {}", class_name, staff)
        };

        let color = colors.session_color(&assignments);

        events.push(CalendarEvent {
            title,
            start,
            end: start + TimeDelta::minutes(SESSION_LENGTH_MINUTES),
            color,
            kind: EventKind::ClassSession {
                session_id: session.id,
                schedule_ids: assignments.iter().map(|a| a.id).collect(),
            },
        });
    }

    for schedule in schedules {
        let (Some(shift_id), Some(shift), Some(staff)) = (schedule.shift_id, &schedule.shift, &schedule.staff) else {
            continue;
        };
        let Some(date) = schedule.date.as_deref() else {
            continue;
        };
        let (Some(start), Some(end)) = (combine(date, &shift.start_time), combine(date, &shift.end_time)) else {
            warn!("Skipping shift assignment {} with unreadable date/time", schedule.id);
            continue;
        };

        let color = colors.color_for(schedule.staff_id).to_string();

        events.push(CalendarEvent {
            title: format!("{} - Ca: {}", staff.full_name, shift.name),
            start,
            end,
            color,
            kind: EventKind::Shift {
                schedule_id: schedule.id,
                shift_id,
            },
        });
    }

    events
}

fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_calendar_date(date)?.and_time(parse_clock(time)?))
}
