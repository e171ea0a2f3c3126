use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use center_admin::client::{ApiRequest, ApiTransport, RequestBody};
use center_admin::error::AppError;
use center_admin::models::{OtRequest, Staff};
use center_admin::ot::{BreakdownRow, OtDecision, initial_rows, prepare_decision};
use center_admin::schedule::summarize_day;
use center_admin::services::OtRequestService;
use reqwest::Method;
use serde_json::{Value, json};

/// Records every request and answers with no content.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    fn calls(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, AppError> {
        self.requests.lock().unwrap().push(request);
        Ok(None)
    }
}

fn ot_request() -> OtRequest {
    serde_json::from_value(json!({
        "id": 7,
        "staffId": 2,
        "staff": { "id": 2, "fullName": "Minh" },
        "date": "2024-05-08",
        "detectedDuration": { "hours": 2, "minutes": 0, "seconds": 12 },
        "status": "pending",
        "schedules": [{
            "id": 3,
            "staffId": 2,
            "date": "2024-05-08",
            "shiftId": 9,
            "shift": { "id": 9, "name": "Morning", "startTime": "08:00:00", "endTime": "12:00:00" }
        }]
    }))
    .expect("ot request should deserialize")
}

fn staff() -> Staff {
    serde_json::from_value(json!({
        "id": 2,
        "fullName": "Minh",
        "rates": { "teacher": "150000.00", "part-time": 40000 }
    }))
    .expect("staff should deserialize")
}

fn body(request: &ApiRequest) -> &Value {
    match &request.body {
        RequestBody::Json(value) => value,
        other => panic!("expected a JSON body, got {:?}", other),
    }
}

fn setup() -> (Arc<RecordingTransport>, OtRequestService) {
    let transport = Arc::new(RecordingTransport::default());
    let service = OtRequestService::new(transport.clone());
    (transport, service)
}

#[tokio::test]
async fn test_row_without_role_is_rejected_before_any_request() {
    let (transport, service) = setup();
    let decision = OtDecision::Approve {
        rows: vec![BreakdownRow::new("teacher", 1, 0, 1.5), BreakdownRow::new("  ", 1, 0, 1.0)],
        notes: None,
    };

    let result = service.decide(&ot_request(), &staff(), decision).await;

    match result {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Please choose a pay rate for every row."),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_role_missing_from_rates_is_rejected() {
    let (transport, service) = setup();
    let decision = OtDecision::Approve {
        rows: vec![BreakdownRow::new("assistant", 2, 0, 1.0)],
        notes: None,
    };

    let result = service.decide(&ot_request(), &staff(), decision).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_approval_needs_at_least_one_row() {
    let (transport, service) = setup();

    let result = service
        .decide(&ot_request(), &staff(), OtDecision::Approve { rows: vec![], notes: None })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_unbalanced_breakdown_is_still_submitted() {
    let (transport, service) = setup();
    let decision = OtDecision::Approve {
        rows: vec![BreakdownRow::new("teacher", 1, 30, 1.5), BreakdownRow::new("part-time", 0, 15, 0.0)],
        notes: Some("  checked with Minh  ".to_string()),
    };

    let prepared = service
        .decide(&ot_request(), &staff(), decision)
        .await
        .expect("approval should be sent");

    assert_eq!(prepared.entered_minutes, 105);
    assert_eq!(prepared.detected_minutes, Some(120));
    assert!(!prepared.is_balanced());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::PATCH);
    assert_eq!(calls[0].endpoint, "/ot-requests/7/status");
    assert_eq!(
        body(&calls[0]),
        &json!({
            "status": "approved",
            "notes": "checked with Minh",
            "breakdown": [
                { "roleKey": "teacher", "duration": { "hours": 1, "minutes": 30 }, "multiplier": 1.5 },
                { "roleKey": "part-time", "duration": { "hours": 0, "minutes": 15 }, "multiplier": 1.0 }
            ]
        })
    );
}

#[tokio::test]
async fn test_rejection_sends_only_status_and_notes() {
    let (transport, service) = setup();

    let prepared = service
        .decide(
            &ot_request(),
            &staff(),
            OtDecision::Reject {
                notes: Some("Not scheduled".to_string()),
            },
        )
        .await
        .expect("rejection should be sent");

    assert!(prepared.is_balanced());
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(body(&calls[0]), &json!({ "status": "rejected", "notes": "Not scheduled" }));
}

#[test]
fn test_minutes_above_an_hour_are_rejected() {
    let decision = OtDecision::Approve {
        rows: vec![BreakdownRow::new("teacher", 0, 90, 1.0)],
        notes: None,
    };

    let result = prepare_decision(&ot_request(), &staff().rates, decision);

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_oversized_rows_are_rejected_before_any_request() {
    let (transport, service) = setup();
    let too_long = OtDecision::Approve {
        rows: vec![BreakdownRow::new("teacher", 80_000_000, 0, 1.0)],
        notes: None,
    };
    let overflowing_sum = OtDecision::Approve {
        rows: vec![
            BreakdownRow::new("teacher", 50_000_000, 0, 1.0),
            BreakdownRow::new("part-time", 50_000_000, 0, 1.0),
        ],
        notes: None,
    };

    assert!(matches!(
        prepare_decision(&ot_request(), &staff().rates, too_long),
        Err(AppError::Validation(_))
    ));
    let result = service.decide(&ot_request(), &staff(), overflowing_sum).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(transport.calls().is_empty());
}

#[test]
fn test_initial_rows_cover_the_detected_duration() {
    let request = ot_request();
    let summary = summarize_day(&request.attendances, &request.schedules);

    let rows = initial_rows(&request, &summary);

    assert_eq!(rows, vec![BreakdownRow::new("part-time", 2, 0, 1.0)]);

    let prepared = prepare_decision(&request, &staff().rates, OtDecision::Approve { rows, notes: None })
        .expect("seeded rows should validate");
    assert!(prepared.is_balanced());
}
