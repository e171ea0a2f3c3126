use std::sync::Arc;

use crate::client::{ApiTransport, HttpApiClient};
use crate::config::ApiConfig;
use crate::db;
use crate::error::AppError;
use crate::services::{
    AttendanceService, ClassService, OtRequestService, ParentService, PayrollService, ReportService, RoleService,
    ScheduleService, ShiftService, StaffService, StudentService, UserService,
};
use crate::session::{SqliteTokenStore, TokenStore};

/// Shared handles every command works with.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ApiTransport>,
    pub tokens: Arc<dyn TokenStore>,
}

impl AppState {
    pub fn new(api: Arc<dyn ApiTransport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// Opens the session database and builds the HTTP client on top of it.
    pub async fn connect(config: &ApiConfig) -> Result<Self, AppError> {
        let pool = db::connect(&config.session_db_url).await?;
        let tokens: Arc<dyn TokenStore> = Arc::new(SqliteTokenStore::new(pool));
        let api: Arc<dyn ApiTransport> = Arc::new(HttpApiClient::new(config, tokens.clone())?);
        Ok(Self::new(api, tokens))
    }

    pub fn classes(&self) -> ClassService {
        ClassService::new(self.api.clone())
    }

    pub fn students(&self) -> StudentService {
        StudentService::new(self.api.clone())
    }

    pub fn parents(&self) -> ParentService {
        ParentService::new(self.api.clone())
    }

    pub fn staff(&self) -> StaffService {
        StaffService::new(self.api.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.api.clone())
    }

    pub fn roles(&self) -> RoleService {
        RoleService::new(self.api.clone())
    }

    pub fn shifts(&self) -> ShiftService {
        ShiftService::new(self.api.clone())
    }

    pub fn schedules(&self) -> ScheduleService {
        ScheduleService::new(self.api.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.api.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.api.clone())
    }

    pub fn ot_requests(&self) -> OtRequestService {
        OtRequestService::new(self.api.clone())
    }

    pub fn payroll(&self) -> PayrollService {
        PayrollService::new(self.api.clone())
    }
}
