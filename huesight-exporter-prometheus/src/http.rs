//! HTTP server for Prometheus metrics endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use huesight_bridge_client::BridgeClient;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::collector::SharedCollector;
use crate::exposition::{self, CONTENT_TYPE};

/// Application state shared across handlers.
struct AppState<B> {
    collector: SharedCollector<B>,
    index: Arc<str>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            collector: self.collector.clone(),
            index: self.index.clone(),
        }
    }
}

/// Landing page linking to the metrics path.
fn index_page(metrics_path: &str) -> String {
    format!(
        r#"<html>
	<head>
		<title>Hue Exporter</title>
	</head>
	<body>
		<h1>Hue Exporter</h1>
		<p>
			<a href='{}'>metrics</a>
		</p>
	</body>
</html>
"#,
        metrics_path
    )
}

/// Create the HTTP router.
fn create_router<B: BridgeClient>(collector: SharedCollector<B>, metrics_path: &str) -> Router {
    let state = AppState {
        collector,
        index: Arc::from(index_page(metrics_path)),
    };

    Router::new()
        .route("/", get(index_handler::<B>))
        .route(metrics_path, get(metrics_handler::<B>))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler for the landing page.
async fn index_handler<B: BridgeClient>(State(state): State<AppState<B>>) -> Html<String> {
    Html(state.index.to_string())
}

/// Handler for the metrics endpoint.
///
/// Bridge failures surface as `up 0` with HTTP 200.
async fn metrics_handler<B: BridgeClient>(State(state): State<AppState<B>>) -> Response {
    let records = state.collector.collect().await;

    match exposition::render(state.collector.describe(), records) {
        Ok(body) => (StatusCode::OK, [("content-type", CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode metrics\n",
            )
                .into_response()
        }
    }
}

/// Handler for the /health endpoint.
async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// HTTP server configuration.
pub struct HttpServer<B> {
    collector: SharedCollector<B>,
    listen_addr: SocketAddr,
    metrics_path: String,
}

impl<B: BridgeClient> HttpServer<B> {
    /// Create a new HTTP server.
    pub fn new(
        collector: SharedCollector<B>,
        listen_addr: SocketAddr,
        metrics_path: String,
    ) -> Self {
        Self {
            collector,
            listen_addr,
            metrics_path,
        }
    }

    /// Run the HTTP server until the shutdown signal is received.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.listen_addr, e))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until the shutdown signal is received.
    pub async fn serve(
        self,
        listener: tokio::net::TcpListener,
        mut shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        let router = create_router(self.collector, &self.metrics_path);
        let addr = listener.local_addr()?;

        info!(
            addr = %addr,
            path = %self.metrics_path,
            "HTTP server listening"
        );

        // Run server with graceful shutdown
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                    if *shutdown.borrow() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::LightCollector;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use huesight_bridge_client::mock::{MockBridgeClient, light};
    use tower::ServiceExt;

    async fn make_collector(bridge: MockBridgeClient) -> SharedCollector<MockBridgeClient> {
        let (collector, _) = LightCollector::new(bridge).await;
        Arc::new(collector)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let bridge = MockBridgeClient::new(vec![light(1, "Lamp", "AA:BB", true, true, 200, 0, 50)]);
        let router = create_router(make_collector(bridge).await, "/metrics");

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("openmetrics-text"));

        let body = body_string(response).await;
        assert!(body.contains("\nup 1\n"));
        assert!(body.contains("light_brightness{"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_escapes_light_names() {
        let bridge = MockBridgeClient::new(vec![light(
            7,
            "Kid's \"Lamp\"",
            "AA:BB",
            true,
            true,
            1,
            2,
            3,
        )]);
        let router = create_router(make_collector(bridge).await, "/metrics");

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(r#"light_status{name="Kid's \"Lamp\"",id="7",unique_id="AA:BB"} 1"#));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_bridge_down_is_ok() {
        let router = create_router(
            make_collector(MockBridgeClient::unreachable()).await,
            "/metrics",
        );

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("\nup 0\n"));
        assert!(!body.contains("light_status{"));
    }

    #[tokio::test]
    async fn test_index_links_metrics_path() {
        let collector = make_collector(MockBridgeClient::new(Vec::new())).await;
        let router = create_router(collector, "/hue/metrics");

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<a href='/hue/metrics'>metrics</a>"));
    }

    #[tokio::test]
    async fn test_health_endpoint_does_not_query_bridge() {
        let bridge = MockBridgeClient::new(Vec::new());
        let router = create_router(make_collector(bridge.clone()).await, "/metrics");

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // Only the startup validation query
        assert_eq!(bridge.calls(), 1);
    }

    #[tokio::test]
    async fn test_custom_metrics_path() {
        let collector = make_collector(MockBridgeClient::new(Vec::new())).await;
        let router = create_router(collector, "/prometheus/metrics");

        // Custom path should work
        let response = router
            .clone()
            .oneshot(
                Request::get("/prometheus/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Default path should 404
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
