use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, fetch_list};
use crate::error::AppError;
use crate::models::{PayrollQuery, StaffPayroll};

pub struct PayrollService {
    api: Arc<dyn ApiTransport>,
}

impl PayrollService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn report(&self, query: &PayrollQuery) -> Result<Vec<StaffPayroll>, AppError> {
        query.validate()?;
        let request = ApiRequest::get("/payroll/report")
            .query("fromDate", query.from_date.format("%Y-%m-%d"))
            .query("toDate", query.to_date.format("%Y-%m-%d"))
            .query_opt("staffId", query.staff_id);
        let report: Vec<StaffPayroll> = fetch_list(self.api.as_ref(), request).await?;
        info!(
            "Payroll report {} to {} covers {} staff",
            query.from_date,
            query.to_date,
            report.len()
        );
        Ok(report)
    }
}
