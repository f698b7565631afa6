//! HTTP host for the contacts server.
//!
//! Owns the outer router: health and docs endpoints, the shared middleware
//! stack, and the listener loop with graceful shutdown. Feature modules hand
//! in their own `Router` and OpenAPI document; nothing is discovered
//! implicitly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
pub mod shutdown;
mod web;

pub use config::ApiIngressConfig;

/// The HTTP host. Construct once at startup, then `build_router` + `serve`.
#[derive(Clone)]
pub struct ApiIngress {
    config: ApiIngressConfig,
    request_timeout: Option<Duration>,
    openapi: Option<Arc<utoipa::openapi::OpenApi>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    /// Create a new ApiIngress instance with the given configuration
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            request_timeout: Some(Duration::from_secs(30)),
            openapi: None,
        }
    }

    /// Per-request handler timeout; `None` disables it.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Document served at `/openapi.json` when docs are enabled.
    pub fn with_openapi(mut self, doc: utoipa::openapi::OpenApi) -> Self {
        self.openapi = Some(Arc::new(doc));
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.config
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_addr))
    }

    /// Wrap the module routes with host endpoints and the middleware stack.
    pub fn build_router(&self, api: Router) -> Router {
        tracing::debug!("Building HTTP router");
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(api);

        if self.config.enable_docs {
            router = self.attach_docs(router);
        }

        // Layers apply bottom-up; the last one added is the outermost.
        // PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if let Some(timeout) = self.request_timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        let x_request_id = request_id::header();
        router
            .layer(request_id::create_trace_layer())
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                request_id::MakeReqId,
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id))
    }

    fn attach_docs(&self, router: Router) -> Router {
        let doc = self
            .openapi
            .clone()
            .unwrap_or_else(|| Arc::new(utoipa::openapi::OpenApi::default()));

        tracing::info!(paths = doc.paths.paths.len(), "Serving OpenAPI document");

        router
            .route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move {
                        (
                            [(header::CACHE_CONTROL, "no-store")],
                            axum::Json((*doc).clone()),
                        )
                            .into_response()
                    }
                }),
            )
            .route("/docs", get(web::serve_docs))
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.bind_addr()?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
