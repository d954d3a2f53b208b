//! Activity export endpoint

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    services::export::ExportOutcome,
};

/// Export request, dates in `YYYY-MM-DD`
#[derive(Deserialize, ToSchema)]
pub struct ExportRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Returned instead of a file when the range holds no records
#[derive(Serialize, ToSchema)]
pub struct ExportEmptyResponse {
    pub status: String,
    pub message: String,
}

/// Export visit records for a date range as a CSV attachment
#[utoipa::path(
    post,
    path = "/export-csv",
    tag = "export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "CSV attachment, or a no-records message", body = ExportEmptyResponse),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn export_csv(
    State(state): State<crate::AppState>,
    Json(request): Json<ExportRequest>,
) -> AppResult<Response> {
    let outcome = state
        .services
        .export
        .export_range(&request.start_date, &request.end_date)
        .await?;

    match outcome {
        ExportOutcome::Empty => Ok(Json(ExportEmptyResponse {
            status: "empty".to_string(),
            message: "No visitor records in the selected date range".to_string(),
        })
        .into_response()),
        ExportOutcome::Csv { filename, content } => {
            let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
                .map_err(|e| AppError::Internal(format!("Invalid export filename: {}", e)))?;

            let mut response = content.into_response();
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            );
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, disposition);
            Ok(response)
        }
    }
}
