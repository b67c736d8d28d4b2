//! HTTP surface: recommendations plus the LLM text assistants.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use recommender_core::assist::{self, AssistError, Rephrased};
use recommender_core::context::AppContext;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

type ApiError = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

pub fn create_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/recommend/{question_id}", get(recommend))
        .route("/tags", post(suggest_tags))
        .route("/summarize", post(summarize))
        .route("/rephrase", post(rephrase))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub async fn start_server(ctx: AppContext, addr: SocketAddr) -> Result<()> {
    let app = create_router(Arc::new(ctx));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub top_k: Option<usize>,
}

/// GET /recommend/{question_id} - related question ids, most similar first
async fn recommend(
    State(ctx): State<Arc<AppContext>>,
    Path(question_id): Path<String>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let top_k = params.top_k.unwrap_or(ctx.recommender.default_top_k());
    match ctx.recommender.recommend(&question_id, top_k).await {
        Ok(ids) => Ok(Json(ids)),
        Err(e) => {
            error!("Error fetching recommendations: {e}");
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch recommendations",
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub tags: Vec<String>,
}

/// POST /tags
async fn suggest_tags(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<TagRequest>,
) -> Result<Json<TagResponse>, ApiError> {
    assist::suggest_tags(&req.text, &ctx.registry)
        .await
        .map(|tags| Json(TagResponse { tags }))
        .map_err(|e| {
            error!("Error suggesting tags: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to suggest tags")
        })
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /summarize
async fn summarize(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    match assist::summarize_answers(&req.answers, &ctx.registry).await {
        Ok(summary) => Ok(Json(SummaryResponse { summary })),
        Err(AssistError::NothingToSummarize) => Err(failure(
            StatusCode::BAD_REQUEST,
            "No answers to summarize",
        )),
        Err(e) => {
            error!("Error summarizing answers: {e}");
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to summarize answers",
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RephraseRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct RephraseResponse {
    pub rephrased: Rephrased,
}

/// POST /rephrase
async fn rephrase(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<RephraseRequest>,
) -> Result<Json<RephraseResponse>, ApiError> {
    assist::rephrase_question(&req.title, &req.description, &ctx.registry)
        .await
        .map(|rephrased| Json(RephraseResponse { rephrased }))
        .map_err(|e| {
            error!("Error rephrasing question: {e}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to rephrase question",
            )
        })
}
