//! gatehouse host binary: discovers plugin binaries, supervises them, and
//! serves a demo HTTP application behind the plugin pipeline.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gatehouse::contract::{Category, PluginConfig, TelemetryConfig};
use gatehouse::pipeline::middleware::plugin_middleware;
use gatehouse::{discovery, Manager, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "gatehouse", version, about = "HTTP middleware plugin host")]
struct Args {
    /// Directory scanned for plugin binaries.
    #[arg(long, default_value = "plugins")]
    plugin_dir: PathBuf,

    /// Address the HTTP server listens on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("starting gatehouse");

    let binaries = discovery::plugin_binaries(&[args.plugin_dir.clone()])?;
    info!(count = binaries.len(), "found plugin binaries");

    let manager = Arc::new(Manager::new());
    let pipeline = Arc::new(Pipeline::new());

    for binary in &binaries {
        let instance = match manager.start(binary).await {
            Ok(instance) => instance,
            Err(err) => {
                error!(path = %binary.display(), error = %err, "failed to start plugin");
                continue;
            }
        };

        let id = instance.id().to_string();
        let category = categorize(&id);
        // Authentication is load-bearing: if its plugin breaks, requests
        // must not slip past it.
        let instance = instance
            .with_required(category == Category::Authentication)
            .with_config(PluginConfig {
                telemetry: TelemetryConfig {
                    service_name: id,
                    ..Default::default()
                },
                ..Default::default()
            });

        if let Err(err) = instance.configure().await {
            error!(plugin = %instance.id(), error = %err, "failed to configure plugin");
        }

        info!(plugin = %instance.id(), category = %category, "registered plugin");
        pipeline.register(category, Arc::new(instance));
    }

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/example", get(example))
        .route("/api/v1/echo", post(echo))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&pipeline),
            plugin_middleware,
        ));

    info!(addr = %args.listen, "server starting");
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("shutting down plugins");
    match tokio::time::timeout(Duration::from_secs(10), manager.stop_all()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!(error = %err, "failed to stop plugins"),
        Err(_) => error!("plugin shutdown timed out"),
    }

    Ok(())
}

/// Assigns a category from the plugin id, defaulting to validation.
fn categorize(id: &str) -> Category {
    if id.contains("header-stamp") {
        Category::Content
    } else if id.contains("request-audit") {
        Category::Observability
    } else if id.contains("bearer-gate") {
        Category::Authentication
    } else if id.contains("rate-limit") {
        Category::RateLimiting
    } else {
        Category::Validation
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn example() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Hello from gatehouse" }))
}

async fn echo(body: axum::body::Bytes) -> impl IntoResponse {
    Json(serde_json::json!({ "echo": "received", "bytes": body.len() }))
}

async fn shutdown_signal() {
    let interrupt = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("received interrupt"),
        _ = terminate => info!("received SIGTERM"),
    }
}
