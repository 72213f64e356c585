use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum::extract::multipart::Multipart;
use std::time::Instant;
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::projection::{ReferenceSystem, Transformer};
use crate::survey::records::{read_boreholes, report_to_csv_string};
use crate::survey::{evaluate, ProjectKind, SurveyReport, SurveyRequest};
use crate::types::PlanarPoint;
use super::models::*;
use super::AppState;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: Error) -> ApiError {
    let status = if e.is_validation() {
        warn!("rejected request: {}", e);
        StatusCode::BAD_REQUEST
    } else {
        error!("request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(ErrorResponse { error: e.to_string() }))
}

fn bad_request(message: String) -> ApiError {
    error_response(Error::InvalidInput(message))
}

pub async fn list_crs(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        entries: state.catalog.entries().to_vec(),
    })
}

pub async fn reproject_point(
    State(state): State<AppState>,
    Query(req): Query<ReprojectRequest>,
) -> Result<Json<ReprojectResponse>, ApiError> {
    let start = Instant::now();

    let from = state.catalog.resolve(&req.crs).map_err(error_response)?;
    let to = match req.target.as_deref() {
        Some(target) => state.catalog.resolve(target).map_err(error_response)?,
        None => ReferenceSystem::wgs84(),
    };

    let geo = Transformer::with_registry(&from, &to, &state.registry)
        .and_then(|transformer| transformer.reproject(PlanarPoint::new(req.x, req.y)))
        .map_err(error_response)?;

    Ok(Json(ReprojectResponse {
        x: req.x,
        y: req.y,
        crs: from.to_string(),
        target: to.to_string(),
        latitude: geo.lat,
        longitude: geo.lon,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }))
}

pub async fn run_survey(
    State(state): State<AppState>,
    Json(request): Json<SurveyRequest>,
) -> Result<Json<SurveyReport>, ApiError> {
    let registry = state.registry.clone();

    let report = tokio::task::spawn_blocking(move || evaluate(&request, &registry))
        .await
        .map_err(|e| error_response(Error::Projection(format!("survey task failed: {}", e))))?
        .map_err(error_response)?;

    Ok(Json(report))
}

pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let start = Instant::now();

    let mut csv_data: Option<Vec<u8>> = None;
    let mut crs: Option<String> = None;
    let mut target: Option<String> = None;
    let mut alignment: Option<String> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read csv field: {}", e)))?;
                csv_data = Some(bytes.to_vec());
            }
            "crs" | "target" | "alignment" | "kind" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read {} field: {}", name, e)))?;
                let slot = match name.as_str() {
                    "crs" => &mut crs,
                    "target" => &mut target,
                    "alignment" => &mut alignment,
                    _ => &mut kind,
                };
                *slot = Some(text);
            }
            _ => debug!(field = %name, "ignoring multipart field"),
        }
    }

    let csv_data = csv_data.ok_or_else(|| bad_request("Missing CSV file".to_string()))?;
    let crs = crs.ok_or_else(|| bad_request("Missing crs parameter".to_string()))?;

    let crs = state.catalog.resolve(&crs).map_err(error_response)?;
    let target = match target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => state.catalog.resolve(target).map_err(error_response)?,
        None => ReferenceSystem::wgs84(),
    };

    let alignment: Vec<PlanarPoint> = match alignment.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(json) => serde_json::from_str::<Vec<(f64, f64)>>(json)
            .map_err(|e| bad_request(format!("alignment must be a JSON array of [x, y] pairs: {}", e)))?
            .into_iter()
            .map(PlanarPoint::from)
            .collect(),
        None => Vec::new(),
    };

    let kind = match kind.as_deref().map(str::trim) {
        Some("tunnel_boring") => ProjectKind::TunnelBoring,
        Some("offshore") => ProjectKind::Offshore,
        Some(other) if !other.is_empty() => {
            return Err(bad_request(format!("Unknown project kind '{}'", other)));
        }
        _ if alignment.is_empty() => ProjectKind::Offshore,
        _ => ProjectKind::TunnelBoring,
    };

    let registry = state.registry.clone();
    let body = tokio::task::spawn_blocking(move || -> crate::error::Result<String> {
        let boreholes = read_boreholes(&csv_data[..])?;
        let request = SurveyRequest {
            kind,
            crs,
            target,
            alignment,
            boreholes,
        };
        let report = evaluate(&request, &registry)?;
        report_to_csv_string(&report)
    })
    .await
    .map_err(|e| error_response(Error::Projection(format!("upload task failed: {}", e))))?
    .map_err(error_response)?;

    debug!(
        execution_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "processed upload"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"borehole_report.csv\""),
        ],
        body,
    )
        .into_response())
}
