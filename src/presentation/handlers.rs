// HTTP request handlers
use crate::application::analysis_service::{submit_upload, UploadFile, UploadStatus};
use crate::application::catalog_service::filtered_selectors;
use crate::application::share_codec::SharePlan;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct FilterQueryParams {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct ResolveParams {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogResponse {
    pub timeseries: Vec<String>,
    pub percentiles: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// CSV files currently in the resources directory
pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<Value> {
    let files = match state.catalog_service.list_series_files().await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!("Error listing series files: {:#}", e);
            Vec::new()
        }
    };
    Json(json!({ "selection": files }))
}

/// Selector contents after applying the keyword filter
pub async fn filter_catalog(
    Query(params): Query<FilterQueryParams>,
    State(state): State<Arc<AppState>>,
) -> Json<CatalogResponse> {
    let selectors = filtered_selectors(&state.catalogs, params.filter.as_deref().unwrap_or(""));
    Json(CatalogResponse {
        timeseries: selectors.timeseries.entries().to_vec(),
        percentiles: selectors.percentiles.entries().to_vec(),
    })
}

/// Panels and range a share URL would restore
pub async fn resolve_share(
    Query(params): Query<ResolveParams>,
    State(state): State<Arc<AppState>>,
) -> Json<SharePlan> {
    Json(state.codec.parse(&params.url))
}

/// Relay uploaded files to the analysis service without waiting for it
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadStatus>, (StatusCode, String)> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        files.push(UploadFile::new(file_name, content));
    }

    if files.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "no files attached".to_string()));
    }
    Ok(Json(submit_upload(state.analysis.clone(), files)))
}
