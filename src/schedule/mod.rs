pub mod calendar;
pub mod colors;
pub mod reconcile;

pub use calendar::{CalendarEvent, EventKind, WeeklySchedule, week_bounds};
pub use colors::{StaffColorMap, UNASSIGNED_COLOR};
pub use reconcile::{DaySummary, summarize_day};
