use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use crate::api::AppState;
use crate::formatter::normalize;
use crate::report::build_and_dispatch;
use crate::types::{GenerateReportRequest, GenerateReportResponse, ResponseMetadata};
use crate::{AppError, Result};

pub async fn handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<Json<GenerateReportResponse>> {
    let start = Instant::now();

    // Validate request
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;
    let property = request
        .property_data
        .ok_or_else(|| AppError::Validation("Missing propertyData in request body".to_string()))?;

    let ai_client = state
        .ai_client
        .as_ref()
        .ok_or_else(|| AppError::Configuration("OPENAI_API_KEY is not configured".to_string()))?;

    let view = normalize(&property);
    let report = build_and_dispatch(ai_client.as_ref(), &view, request.user_narrative.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to generate report for parcel {}: {}", view.parcel_id, e);
            e
        })?;

    let execution_time = start.elapsed().as_millis() as u64;

    Ok(Json(GenerateReportResponse {
        report: report.text,
        metadata: ResponseMetadata {
            timestamp: Utc::now().to_rfc3339(),
            execution_time_ms: execution_time,
            model_used: Some(report.model),
            usage: report.usage,
        },
    }))
}
