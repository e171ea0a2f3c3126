use std::sync::Arc;

use tracing::{info, warn};

use crate::client::{ApiRequest, ApiTransport, execute, fetch_list};
use crate::error::AppError;
use crate::models::{OtRequest, OtStatus, Staff};
use crate::ot::{OtDecision, PreparedDecision, prepare_decision};

pub struct OtRequestService {
    api: Arc<dyn ApiTransport>,
}

impl OtRequestService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    /// The staff filter only applies together with a status filter.
    pub async fn list(&self, status: Option<OtStatus>, staff_id: Option<i64>) -> Result<Vec<OtRequest>, AppError> {
        let mut request = ApiRequest::get("/ot-requests");
        if let Some(status) = status {
            request = request.query("status", status).query_opt("staffId", staff_id);
        }
        fetch_list(self.api.as_ref(), request).await
    }

    pub async fn pending(&self) -> Result<Vec<OtRequest>, AppError> {
        self.list(Some(OtStatus::Pending), None).await
    }

    /// Validates the decision against the staff member's rates and, when it
    /// passes, sends it. Invalid decisions never reach the network.
    pub async fn decide(
        &self,
        request: &OtRequest,
        staff: &Staff,
        decision: OtDecision,
    ) -> Result<PreparedDecision, AppError> {
        if request.status != OtStatus::Pending {
            warn!("OT request {} is already {}", request.id, request.status);
        }

        let prepared = prepare_decision(request, &staff.rates, decision)?;

        execute(
            self.api.as_ref(),
            ApiRequest::patch(format!("/ot-requests/{}/status", request.id), &prepared.update)?,
        )
        .await?;

        info!(
            "OT request {} for {} marked {}",
            request.id,
            request.staff_name(),
            prepared.update.status
        );
        Ok(prepared)
    }
}
