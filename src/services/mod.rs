pub mod attendance;
pub mod classes;
pub mod ot_requests;
pub mod parents;
pub mod payroll;
pub mod reports;
pub mod roles;
pub mod schedules;
pub mod shifts;
pub mod staff;
pub mod students;
pub mod users;

pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use ot_requests::OtRequestService;
pub use parents::ParentService;
pub use payroll::PayrollService;
pub use reports::ReportService;
pub use roles::RoleService;
pub use schedules::ScheduleService;
pub use shifts::ShiftService;
pub use staff::StaffService;
pub use students::StudentService;
pub use users::UserService;
