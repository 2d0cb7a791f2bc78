use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AnchorRect, BoardConfig, BoardDataset, BoardLayout, BoardQuery, Granularity, LayoutCache,
    LayoutError, ParseError, RowColor, StatusFilter, TooltipGeometry, TooltipPosition,
    compute_layout, layout::ColorAssignment, position_tooltip,
};

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<BoardDataset>>,
    config: Arc<BoardConfig>,
    cache: Arc<Mutex<LayoutCache>>,
}

impl AppState {
    pub fn new(dataset: BoardDataset, config: BoardConfig) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(LayoutCache::new())),
        }
    }

    /// Layout of the server-held dataset, memoized across requests.
    fn cached_layout(&self, query: &BoardQuery) -> Result<Arc<BoardLayout>, LayoutError> {
        let dataset = self.dataset.read();
        self.cache.lock().get_or_compute(
            &dataset.bookings,
            &dataset.resources,
            query,
            &self.config,
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<LayoutError> for ApiError {
    fn from(value: LayoutError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<ParseError> for ApiError {
    fn from(value: ParseError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Query string of `GET /layout`. Every field is optional.
#[derive(Debug, Deserialize)]
struct LayoutParams {
    date: Option<String>,
    view: Option<String>,
    statuses: Option<String>,
    today: Option<String>,
}

impl LayoutParams {
    fn into_query(self, config: &BoardConfig) -> Result<BoardQuery, ApiError> {
        let today = match self.today.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };
        let reference_date = match self.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => today,
        };
        let granularity = match self.view.as_deref() {
            Some(raw) => Granularity::from_str(raw)?,
            None => Granularity::default(),
        };
        let statuses = match self.statuses.as_deref() {
            Some(raw) => StatusFilter::from_str(raw)?,
            None => config.status_filter(),
        };
        Ok(BoardQuery {
            reference_date,
            granularity,
            statuses,
            today,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LayoutRequest {
    #[serde(flatten)]
    dataset: BoardDataset,
    query: BoardQuery,
}

#[derive(Debug, Deserialize)]
struct TooltipRequest {
    anchor: AnchorRect,
    container_width: f64,
    #[serde(default)]
    geometry: Option<TooltipGeometry>,
}

#[derive(Debug, Serialize)]
struct ResourceColorEntry {
    id: String,
    display_name: String,
    color: RowColor,
    color_hex: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/layout", get(get_layout).post(post_layout))
        .route("/tooltip", post(tooltip))
        .route("/resources/colors", get(resource_colors))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, dataset: BoardDataset, config: BoardConfig) -> std::io::Result<()> {
    let state = AppState::new(dataset, config);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("planning-board HTTP API listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_layout(
    State(state): State<AppState>,
    Query(params): Query<LayoutParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query(&state.config)?;
    let layout = state.cached_layout(&query)?;
    Ok(Json(&*layout).into_response())
}

/// Stateless: computes straight from the request body and leaves the cache alone.
async fn post_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<BoardLayout>, ApiError> {
    request
        .dataset
        .validate()
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    let layout = compute_layout(
        &request.dataset.bookings,
        &request.dataset.resources,
        &request.query,
        &state.config,
    )?;
    Ok(Json(layout))
}

async fn tooltip(
    State(state): State<AppState>,
    Json(request): Json<TooltipRequest>,
) -> Result<Json<TooltipPosition>, ApiError> {
    if !request.container_width.is_finite() {
        return Err(ApiError::invalid("container_width must be a finite number"));
    }
    let geometry = request.geometry.unwrap_or(state.config.tooltip);
    Ok(Json(position_tooltip(
        request.anchor,
        request.container_width,
        geometry,
    )))
}

async fn resource_colors(State(state): State<AppState>) -> Json<Vec<ResourceColorEntry>> {
    let dataset = state.dataset.clone();
    let guard = dataset.read();
    let colors = ColorAssignment::new(&guard.resources, state.config.palette_size());
    let entries = guard
        .resources
        .iter()
        .map(|resource| {
            let color = colors
                .index_of(&resource.id)
                .map(RowColor::Palette)
                .unwrap_or(RowColor::Unassigned);
            ResourceColorEntry {
                id: resource.id.clone(),
                display_name: resource.display_name.clone(),
                color,
                color_hex: state.config.color_hex(color).to_string(),
            }
        })
        .collect();
    Json(entries)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::from(ParseError::InvalidDate(raw.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Booking, BookingStatus, Resource};
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn post_layout_leaves_server_cache_untouched() {
        let dataset = BoardDataset::new(
            vec![Resource::new("T1", "Alice")],
            vec![
                Booking::new("A", d(2024, 3, 5), d(2024, 3, 5), BookingStatus::Planned)
                    .with_resource("T1"),
            ],
        );
        let state = AppState::new(dataset, BoardConfig::default());
        let app = router(state.clone());
        let uri = "/layout?date=2024-03-04&view=week&today=2024-03-04";

        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json!({
            "bookings": [{"id": "other", "start_date": "2024-03-06", "status": "draft"}],
            "query": {"reference_date": "2024-03-04", "today": "2024-03-04"}
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/layout")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cache = state.cache.lock();
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }
}
