use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use cli::server::create_router;
use providers::{LlmProvider, ProviderError, ProviderRegistry};
use recommender_core::config::AppConfig;
use recommender_core::context::AppContext;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct Canned(&'static str);

#[async_trait::async_trait]
impl LlmProvider for Canned {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

async fn context(name: &str, reply: &'static str) -> AppContext {
    let mut cfg = AppConfig::default();
    cfg.database.path = format!("sqlite://file:{name}?mode=memory&cache=shared");
    let mut ctx = AppContext::open(cfg).await.unwrap();
    ctx.registry = ProviderRegistry::new()
        .with_llm("canned", Arc::new(Canned(reply)))
        .set_preferred_llm("canned");
    ctx
}

async fn call(ctx: AppContext, req: Request<Body>) -> (StatusCode, Value) {
    let resp = create_router(Arc::new(ctx)).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn recommend_endpoint_returns_ids() {
    let ctx = context("server_recommend", "").await;
    for (id, title) in [
        ("Q1", "How to sort an array"),
        ("Q2", "Sorting algorithms in arrays"),
        ("Q3", "Best pizza recipe"),
    ] {
        ctx.store.upsert_question(id, Some(title), Some(""), &[]).await.unwrap();
    }

    let (status, body) = call(ctx.clone(), get("/recommend/Q1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["Q2", "Q3"]));

    let (status, body) = call(ctx.clone(), get("/recommend/Q1?top_k=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["Q2"]));

    let (status, body) = call(ctx, get("/recommend/unknown")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let ctx = context("server_store_down", "").await;
    ctx.store.pool().close().await;
    let (status, body) = call(ctx, get("/recommend/Q1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch recommendations");
}

#[tokio::test]
async fn tags_endpoint() {
    let ctx = context("server_tags", "Tags: Rust, Tokio").await;
    let (status, body) = call(ctx, post("/tags", r#"{"text": "tokio panics"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "tags": ["rust", "tokio"] }));
}

#[tokio::test]
async fn summarize_endpoint() {
    let ctx = context("server_summarize", "Everyone says use sort.").await;
    let (status, body) = call(
        ctx.clone(),
        post("/summarize", r#"{"answers": ["use sort", "sort works"]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Everyone says use sort.");

    let (status, _) = call(ctx, post("/summarize", r#"{"answers": []}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rephrase_endpoint() {
    let ctx = context(
        "server_rephrase",
        "Title: How can I sort a Vec?\nDescription: Ascending order please.",
    )
    .await;
    let (status, body) = call(
        ctx,
        post("/rephrase", r#"{"title": "sort vec", "description": "how"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rephrased"]["title"], "How can I sort a Vec?");
    assert_eq!(body["rephrased"]["description"], "Ascending order please.");
}

#[tokio::test]
async fn status_endpoint() {
    let ctx = context("server_status", "").await;
    let (status, body) = call(ctx, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
