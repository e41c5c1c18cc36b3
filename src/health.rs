use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

pub const ALIVE_TEXT: &str = "RightQuestionsBot is alive ✅";

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> &'static str {
    ALIVE_TEXT
}

async fn health() -> &'static str {
    "OK"
}

/// Binds the listener up front so a taken port fails startup.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr).await
}

pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router()).await
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        assert_eq!(get_text("/").await, (StatusCode::OK, ALIVE_TEXT.to_string()));
    }

    #[tokio::test]
    async fn health_returns_ok() {
        assert_eq!(get_text("/health").await, (StatusCode::OK, "OK".to_string()));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _) = get_text("/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bind_on_ephemeral_port() {
        let listener = bind(0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
