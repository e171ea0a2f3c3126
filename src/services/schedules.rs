use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch_list};
use crate::error::AppError;
use crate::models::{
    ClassSession, SessionAssignment, ShiftChange, ShiftRangeAssignment, StaffAssignmentRequest, StaffSchedule,
};
use crate::schedule::WeeklySchedule;

pub struct ScheduleService {
    api: Arc<dyn ApiTransport>,
}

impl ScheduleService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn sessions(&self) -> Result<Vec<ClassSession>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/class-sessions")).await
    }

    pub async fn schedules(&self) -> Result<Vec<StaffSchedule>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/staff-schedules")).await
    }

    /// Refetches sessions and assignments concurrently and rebuilds the calendar.
    pub async fn refresh(&self, calendar: &mut WeeklySchedule) -> Result<(), AppError> {
        let (sessions, schedules) = tokio::try_join!(self.sessions(), self.schedules())?;
        calendar.refresh(&sessions, &schedules);
        info!(
            "Calendar refreshed with {} sessions and {} assignments",
            sessions.len(),
            schedules.len()
        );
        Ok(())
    }

    pub async fn assign(&self, request: &StaffAssignmentRequest) -> Result<(), AppError> {
        if request.role_key.trim().is_empty() {
            return Err(AppError::Validation("Choose a role for the assignment.".to_string()));
        }
        if request.class_session_id.is_none() && request.shift_id.is_none() {
            return Err(AppError::Validation("Choose a class session or a shift.".to_string()));
        }
        execute(self.api.as_ref(), ApiRequest::post("/staff-schedules", request)?).await?;
        info!("Assigned staff {} as {}", request.staff_id, request.role_key);
        Ok(())
    }

    pub async fn assign_shift_range(&self, range: &ShiftRangeAssignment) -> Result<(), AppError> {
        range.validate()?;
        execute(self.api.as_ref(), ApiRequest::post("/staff-schedules/assign-shift-range", range)?).await?;
        info!(
            "Assigned staff {} to shift {} from {} to {}",
            range.staff_id, range.shift_id, range.from_date, range.to_date
        );
        Ok(())
    }

    /// Replaces everyone assigned to one class session.
    pub async fn bulk_assign_session(&self, assignment: &SessionAssignment) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::post("/staff-schedules/bulk-assign-session", assignment)?).await?;
        info!(
            "Class session {} now has {} assigned staff",
            assignment.class_session_id,
            assignment.assignments.len()
        );
        Ok(())
    }

    pub async fn update_shift_assignment(&self, schedule_id: i64, change: &ShiftChange) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::patch(format!("/staff-schedules/{}", schedule_id), change)?).await?;
        info!("Assignment {} moved to shift {}", schedule_id, change.shift_id);
        Ok(())
    }

    pub async fn delete_assignment(&self, schedule_id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/staff-schedules/{}", schedule_id))).await?;
        info!("Deleted assignment {}", schedule_id);
        Ok(())
    }
}
