//! SOS relay and admin panel connectivity endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use mayday_core::{DeliveryReport, EmergencyEvent, SosSignal};
use mayday_relay::ProbeReport;

use crate::state::AppState;

use super::{require_session, ErrorResponse};

/// Accept an SOS signal from an authenticated user and relay it to the
/// admin panel. The relay runs synchronously within this request; the
/// response carries the delivery report whether or not delivery
/// succeeded (total failure is a 200 with `status: "error"`).
pub async fn send_sos(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(signal): Json<SosSignal>,
) -> Result<Json<DeliveryReport>, (StatusCode, Json<ErrorResponse>)> {
    let username = require_session(&state, &headers)?;

    let event = EmergencyEvent::from_signal(&username, signal);
    tracing::warn!(
        user = %event.user,
        location = %event.location,
        emergency_type = %event.emergency_type,
        "SOS signal received"
    );

    let report = state.relay.send(&event).await;
    Ok(Json(report))
}

/// Test connectivity to the admin panel.
pub async fn test_connection(State(state): State<Arc<AppState>>) -> Json<ProbeReport> {
    Json(state.probe.probe().await)
}
