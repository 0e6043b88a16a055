//! HTTP API for grading
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /primitives - Known glyph labels
//! - POST /compare - Grade one attempt against a reference
//! - POST /features - Geometric features of one stroke
//! - POST /segment - Gap-based glyph groups as stroke indices
//! - POST /grade/page - Grade every glyph on a raw page

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::core::grader::Grader;
use crate::core::segment::segment_glyphs;
use crate::error::{GradeError, GradeResult};
use crate::types::{
    BatchReport, GeometricFeatures, GradeReport, GreggPrimitive, NormalizedStroke, PageData,
};
use crate::GradingConfig;

/// App state: the grader is read-only and shared by all requests
pub struct AppState {
    pub grader: Grader,
}

/// Error wrapper mapping grading errors to HTTP responses
pub struct ApiError(pub GradeError);

impl From<GradeError> for ApiError {
    fn from(err: GradeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GradeError::InsufficientData { .. } | GradeError::TooManyPoints { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            GradeError::Input(_) | GradeError::InvalidConfig(_) | GradeError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            GradeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One known glyph label
#[derive(Debug, Serialize)]
pub struct PrimitiveInfo {
    pub label: GreggPrimitive,
    pub description: &'static str,
}

/// Compare request
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub user: NormalizedStroke,
    pub reference: NormalizedStroke,
    pub label: Option<String>,
}

/// Features request
#[derive(Debug, Deserialize)]
pub struct FeaturesRequest {
    pub stroke: NormalizedStroke,
    /// Resample to the configured target length first
    #[serde(default)]
    pub resample: bool,
}

/// Features response
#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub features: GeometricFeatures,
    pub vector: Vec<f64>,
    pub names: Vec<&'static str>,
}

/// Segment request
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub strokes: Vec<NormalizedStroke>,
    pub gap_threshold: Option<f64>,
}

/// Segment response: each group lists indices into the request's strokes
#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub groups: Vec<Vec<usize>>,
}

/// Page grading request
#[derive(Debug, Deserialize)]
pub struct GradePageRequest {
    pub page: PageData,
    pub reference: NormalizedStroke,
    pub label: Option<String>,
}

/// Create the API router
pub fn create_router(config: GradingConfig) -> GradeResult<Router> {
    let state = Arc::new(AppState {
        grader: Grader::new(config)?,
    });

    Ok(Router::new()
        .route("/health", get(health))
        .route("/primitives", get(primitives))
        .route("/compare", post(compare))
        .route("/features", post(features))
        .route("/segment", post(segment))
        .route("/grade/page", post(grade_page))
        .with_state(state))
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// List the shorthand primitives
async fn primitives() -> Json<Vec<PrimitiveInfo>> {
    Json(
        GreggPrimitive::ALL
            .into_iter()
            .map(|label| PrimitiveInfo {
                label,
                description: label.description(),
            })
            .collect(),
    )
}

/// Grade one attempt
async fn compare(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<GradeReport>, ApiError> {
    let report = state
        .grader
        .grade(&req.user, &req.reference, req.label.as_deref())?;
    Ok(Json(report))
}

/// Extract features
async fn features(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeaturesRequest>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let features = if req.resample {
        state.grader.resampled_features(&req.stroke)?
    } else {
        state.grader.features(&req.stroke)?
    };
    let vector = features.to_array().to_vec();

    Ok(Json(FeaturesResponse {
        features,
        vector,
        names: GeometricFeatures::names().to_vec(),
    }))
}

/// Segment strokes into glyph groups
async fn segment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SegmentRequest>,
) -> Result<Json<SegmentResponse>, ApiError> {
    let gap_threshold = req
        .gap_threshold
        .unwrap_or(state.grader.config().gap_threshold);
    if !(gap_threshold >= 0.0) {
        return Err(GradeError::Input(format!(
            "gap_threshold must be non-negative, got {}",
            gap_threshold
        ))
        .into());
    }

    let groups = segment_glyphs(&req.strokes, gap_threshold)
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .filter_map(|s| req.strokes.iter().position(|c| std::ptr::eq(c, s)))
                .collect()
        })
        .collect();

    Ok(Json(SegmentResponse { groups }))
}

/// Grade a whole page
async fn grade_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GradePageRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    let report = state
        .grader
        .grade_page(&req.page, &req.reference, req.label.as_deref())?;
    Ok(Json(report))
}

/// Run the API server
pub async fn run_server(config: GradingConfig) -> GradeResult<()> {
    let addr = config.bind_addr();
    let router = create_router(config)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "strokegrade API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
