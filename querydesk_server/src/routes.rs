//! HTTP routes.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use querydesk_core::{DOCS_SOURCE, ParsedCall};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

type AppStateArc = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub answer: String,
    pub sources: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Build the application router with permissive CORS.
pub fn app(state: AppStateArc) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/execute", get(execute))
        .route("/search", get(search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn execute(
    State(state): State<AppStateArc>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ParsedCall>, ApiError> {
    let call = state.router.parse_query(&params.q)?;
    info!("/execute routed to {}", call.name);
    Ok(Json(call))
}

async fn search(
    State(state): State<AppStateArc>,
    Query(params): Query<QueryParams>,
) -> Json<SearchResponse> {
    let answer = state.answers.answer(&params.q).await;
    info!("/search answered from {:?}", answer.origin);
    Json(SearchResponse {
        answer: answer.answer,
        sources: DOCS_SOURCE,
        document_id: answer.document_id,
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "querydesk function router and documentation search",
        "endpoints": {
            "execute": "/execute?q=<your_query>",
            "search": "/search?q=<your_question>",
        },
        "examples": [
            "/execute?q=What is the status of ticket 83742?",
            "/execute?q=Schedule a meeting on 2025-02-15 at 14:00 in Room A",
            "/execute?q=Show my expense balance for employee 10056",
            "/execute?q=Calculate performance bonus for employee 10056 for 2025",
            "/execute?q=Report office issue 45321 for the Facilities department",
            "/execute?q=15801 reported in IT department",
            "/search?q=What does the author affectionately call the => syntax?",
            "/search?q=Which operator converts any value into an explicit boolean?",
            "/search?q=What lets you walk every child node of a ts.Node?",
            "/search?q=What are code pieces like comments and whitespace that aren't in the AST called?",
        ],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(AppState::local().unwrap()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn execute_reported_issue() {
        let (status, body) = get_json("/execute?q=15801%20reported%20in%20IT%20department").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "report_office_issue");

        let args: Value = serde_json::from_str(body["arguments"].as_str().unwrap()).unwrap();
        assert_eq!(args, json!({"issue_code": 15801, "department": "IT"}));
    }

    #[tokio::test]
    async fn execute_ticket_status() {
        let (status, body) =
            get_json("/execute?q=What%20is%20the%20status%20of%20ticket%2083742%3F").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "get_ticket_status");
        assert_eq!(body["arguments"], r#"{"ticket_id": 83742}"#);
    }

    #[tokio::test]
    async fn execute_unknown() {
        let (_, body) = get_json("/execute?q=order%20a%20pizza").await;
        assert_eq!(body["name"], "unknown_function");
        assert_eq!(body["arguments"], r#"{"query": "order a pizza"}"#);
    }

    #[tokio::test]
    async fn execute_oversized_integer_is_bad_request() {
        let (status, body) =
            get_json("/execute?q=what%20is%20the%20status%20of%20ticket%20123456789012345678901234")
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("ticket_id"));
    }

    #[tokio::test]
    async fn missing_query_is_rejected() {
        let (status, _) = get_json("/execute").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get_json("/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_fat_arrow() {
        let (status, body) = get_json(
            "/search?q=What%20does%20the%20author%20affectionately%20call%20the%20%3D%3E%20syntax%3F",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "fat arrow");
        assert_eq!(body["sources"], "typescript-book");
        assert_eq!(body["document_id"], "fat-arrow");
    }

    #[tokio::test]
    async fn search_short_arrow_question_gets_term() {
        let (status, body) = get_json("/search?q=Explain%20the%20fat%20arrow").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "fat arrow");
        assert_eq!(body["document_id"], "fat-arrow");
    }

    #[tokio::test]
    async fn search_not_found_omits_document_id() {
        let (status, body) = get_json("/search?q=zebra%20quilt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], querydesk_knowledge::NOT_FOUND);
        assert!(body.get("document_id").is_none());
    }

    #[tokio::test]
    async fn root_lists_examples() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["examples"].as_array().unwrap().len() >= 6);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_, body) = get_json("/health").await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
