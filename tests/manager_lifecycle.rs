//! Subprocess lifecycle against the real sample plugin binaries.
//!
//! These tests spawn the bin targets built alongside the test suite, so they
//! cover the full path: spawn, socket readiness, gRPC handshake, per-flow
//! calls, and teardown including the force-kill fallback.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use gatehouse::contract::{Flow, Payload};
use gatehouse::proto::HttpRequest;
use gatehouse::{Error, Manager};

fn temp_sockets_with_prefix(prefix: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = std::fs::read_dir(std::env::temp_dir()) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(prefix) && name.ends_with(".sock") {
                found.push(entry.path());
            }
        }
    }
    found
}

#[tokio::test]
async fn start_handshakes_and_stop_all_is_idempotent() {
    let manager = Manager::new();
    let instance = manager
        .start(env!("CARGO_BIN_EXE_header-stamp"))
        .await
        .expect("start header-stamp");

    assert_eq!(instance.id(), "header-stamp");
    assert!(instance.can_handle(Flow::Request));
    assert!(!instance.can_handle(Flow::Response));
    assert_eq!(manager.plugins().len(), 1);

    instance.configure().await.expect("configure");
    instance.health().await.expect("health");
    assert!(instance.ready().await.expect("ready"));

    let request = HttpRequest {
        method: "GET".into(),
        path: "/x".into(),
        ..Default::default()
    };
    let payload = instance
        .handle_request(Payload::Request(request))
        .await
        .expect("handle request");
    let response = payload.into_response().expect("wire response");
    assert!(response.r#continue);
    let stamped = response.modified_request.expect("substituted request");
    assert_eq!(
        stamped.headers.get("X-Gatehouse-Stamp").map(String::as_str),
        Some("header-stamp")
    );

    manager.stop_all().await.expect("stop all");
    assert!(manager.plugins().is_empty());

    // A second pass finds nothing to do and succeeds.
    manager.stop_all().await.expect("stop all again");
    assert!(manager.plugins().is_empty());
}

#[tokio::test]
async fn force_kill_cleans_up_a_plugin_that_ignores_stop() {
    let manager = Manager::new();
    let before = temp_sockets_with_prefix("plugin-stall-");
    manager
        .start(env!("CARGO_BIN_EXE_stall"))
        .await
        .expect("start stall");

    // Only the socket this start created matters; earlier crashed runs may
    // have left strays behind.
    let bound: Vec<PathBuf> = temp_sockets_with_prefix("plugin-stall-")
        .into_iter()
        .filter(|path| !before.contains(path))
        .collect();
    assert_eq!(bound.len(), 1, "stall plugin should have bound one socket");

    let started = Instant::now();
    manager.stop_all().await.expect("stop all despite stall");

    // The graceful path cannot have succeeded; at minimum the exit wait ran.
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert!(manager.plugins().is_empty());
    for socket in bound {
        assert!(
            !socket.exists(),
            "socket file should be removed: {}",
            socket.display()
        );
    }
}

#[cfg(unix)]
#[tokio::test]
async fn start_times_out_when_the_binary_never_binds() {
    let manager = Manager::with_timeouts(Duration::from_millis(400), Duration::from_secs(1));

    let err = manager
        .start("/bin/sleep")
        .await
        .expect_err("sleep never binds the address");

    assert!(matches!(err, Error::StartTimeout { .. }));
    assert!(manager.plugins().is_empty());
}

#[tokio::test]
async fn subprocess_mutations_flow_through_the_middleware() {
    use axum::body::Body;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use gatehouse::contract::Category;
    use gatehouse::pipeline::middleware::plugin_middleware;
    use gatehouse::Pipeline;
    use std::sync::Arc;
    use tower::ServiceExt;

    let manager = Manager::new();
    let instance = manager
        .start(env!("CARGO_BIN_EXE_header-stamp"))
        .await
        .expect("start header-stamp");

    let pipeline = Arc::new(Pipeline::new());
    pipeline.register(Category::Content, Arc::new(instance));

    let app = Router::new()
        .route(
            "/probe",
            get(|request: axum::extract::Request| async move {
                request
                    .headers()
                    .get("X-Gatehouse-Stamp")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("missing")
                    .to_string()
            }),
        )
        .layer(from_fn_with_state(Arc::clone(&pipeline), plugin_middleware));

    let response = app
        .oneshot(
            http::Request::builder()
                .uri("/probe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"header-stamp");

    manager.stop_all().await.expect("stop all");
}
