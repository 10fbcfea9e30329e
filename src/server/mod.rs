//! HTTP surface
//!
//! A thin axum layer over the planner: POST /chat drives a turn,
//! GET /health reports liveness. Request tracing comes from tower-http.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Result, WrapErr};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::planner::Planner;

mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
}

pub fn router(planner: Arc<Planner>) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { planner })
}

pub async fn serve(config: &ServerConfig, planner: Arc<Planner>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("binding {addr}"))?;
    info!(%addr, "serve: listening");
    axum::serve(listener, router(planner))
        .await
        .wrap_err("serving http")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::planner::NoEnrichment;
    use crate::session::MemoryStore;
    use crate::tools::Toolbox;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let planner = Planner::new(
            Arc::new(MemoryStore::new(16)),
            Toolbox::offline(),
            Arc::new(NoEnrichment),
            PlannerConfig::default(),
        );
        router(Arc::new(planner))
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "tripdaemon");
    }

    #[tokio::test]
    async fn test_chat_plans_a_route() {
        let body = serde_json::json!({
            "message": "Plan a trip from Amsterdam to Copenhagen in June, 100km per day"
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["day_plan"].as_array().unwrap().len(), 8);
        assert!(json["session_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_chat_asks_for_missing_details() {
        let body = serde_json::json!({ "message": "I want to ride somewhere" });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "needs_clarification");
        assert_eq!(json["clarifying_questions"].as_array().unwrap().len(), 3);
        assert!(json.get("day_plan").is_none() || json["day_plan"].is_null());
    }
}
