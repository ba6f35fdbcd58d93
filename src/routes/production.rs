use axum::{
    body::Bytes,
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{Dashboard, Palette, StatusCategory};
use crate::csv_source::{self, CsvError};
use crate::models::{DoneOperation, OpenOperation};
use crate::state::DataSource;
use crate::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/production/dashboard", get(dashboard))
        .route("/production/open", get(list_open).put(upload_open))
        .route("/production/done", get(list_done).put(upload_done))
}

/// Dashboard payload: data origin, banner text and all derived figures.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    source: DataSource,
    message: Option<&'static str>,
    dashboard: Dashboard,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Table search parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    search: Option<String>,
}

/// Open-operations table row with its status badge colour.
#[derive(Debug, Serialize)]
struct OpenRow {
    #[serde(flatten)]
    record: OpenOperation,
    badge: Palette,
}

async fn current_dashboard(state: &AppState) -> DashboardResponse {
    // ---
    let dataset = state.dataset.read().await;
    let source = dataset.source();
    DashboardResponse {
        source,
        message: source.banner(),
        dashboard: dataset.dashboard(),
    }
}

async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    debug!("GET /production/dashboard");
    (StatusCode::OK, Json(current_dashboard(&state).await))
}

fn upload_error(kind: &str, err: CsvError) -> axum::response::Response {
    // ---
    warn!("Rejected {} upload: {}", kind, err);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: format!("Could not read the CSV file: {err}"),
        }),
    )
        .into_response()
}

async fn upload_open(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    // ---
    info!("PUT /production/open - {} bytes", body.len());

    let records = match csv_source::decode_utf8(&body).and_then(csv_source::load_open) {
        Ok(records) => records,
        Err(e) => return upload_error("open", e),
    };
    info!("Replacing open operations with {} records", records.len());
    state.dataset.write().await.replace_open(records);

    (StatusCode::OK, Json(current_dashboard(&state).await)).into_response()
}

async fn upload_done(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    // ---
    info!("PUT /production/done - {} bytes", body.len());

    let records = match csv_source::decode_utf8(&body).and_then(csv_source::load_done) {
        Ok(records) => records,
        Err(e) => return upload_error("done", e),
    };
    info!("Replacing done operations with {} records", records.len());
    state.dataset.write().await.replace_done(records);

    (StatusCode::OK, Json(current_dashboard(&state).await)).into_response()
}

async fn list_open(
    Query(params): Query<SearchQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    let term = params.search.unwrap_or_default();
    debug!("GET /production/open search={:?}", term);

    let dataset = state.dataset.read().await;
    let rows: Vec<OpenRow> = dataset
        .open
        .iter()
        .filter(|r| r.matches(&term))
        .map(|r| OpenRow {
            badge: StatusCategory::from_label(&r.status).badge_color(),
            record: r.clone(),
        })
        .collect();

    (StatusCode::OK, Json(rows))
}

async fn list_done(
    Query(params): Query<SearchQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    let term = params.search.unwrap_or_default();
    debug!("GET /production/done search={:?}", term);

    let dataset = state.dataset.read().await;
    let rows: Vec<DoneOperation> = dataset
        .done
        .iter()
        .filter(|r| r.matches(&term))
        .cloned()
        .collect();

    (StatusCode::OK, Json(rows))
}
