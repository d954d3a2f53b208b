//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{export, health, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foyer API",
        version = "0.3.0",
        description = "Front-desk visitor sign-in REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Visits
        visits::check_in,
        visits::advance_check_in,
        visits::vendor_portal,
        visits::records,
        visits::occupancy,
        visits::checkout,
        visits::promote_pending,
        // Export
        export::export_csv,
    ),
    components(
        schemas(
            // Visits
            crate::models::visit::Visit,
            crate::models::visit::CreateVisit,
            crate::models::visit::CreateAdvanceVisit,
            visits::CheckInResponse,
            visits::PendingResponse,
            visits::RecordsResponse,
            visits::OccupancyResponse,
            visits::PromoteRequest,
            visits::StatusResponse,
            // Export
            export::ExportRequest,
            export::ExportEmptyResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visits", description = "Visitor lifecycle"),
        (name = "export", description = "Activity export")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
