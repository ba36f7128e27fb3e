//! Observability plugin that logs every request and response it sees.

use std::sync::atomic::{AtomicU64, Ordering};

use gatehouse::proto::{Capabilities, Flow, HttpRequest, HttpResponse, Metadata};
use gatehouse::sdk::{serve, PluginHandler};
use tonic::Status;

#[derive(Default)]
struct RequestAudit {
    seen: AtomicU64,
}

#[tonic::async_trait]
impl PluginHandler for RequestAudit {
    async fn metadata(&self) -> Metadata {
        Metadata {
            name: "request-audit".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Logs request and response traffic".into(),
            ..Default::default()
        }
    }

    async fn capabilities(&self) -> Capabilities {
        Capabilities {
            flows: vec![Flow::Request as i32, Flow::Response as i32],
        }
    }

    async fn handle_request(&self, request: HttpRequest) -> Result<HttpResponse, Status> {
        let count = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            method = %request.method,
            path = %request.path,
            remote = %request.remote_addr,
            total = count,
            "audited request"
        );
        Ok(HttpResponse {
            r#continue: true,
            ..Default::default()
        })
    }

    async fn handle_response(&self, response: HttpResponse) -> Result<HttpResponse, Status> {
        tracing::info!(
            status = response.status_code,
            bytes = response.body.len(),
            "audited response"
        );
        Ok(HttpResponse {
            r#continue: true,
            ..response
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();
    serve(RequestAudit::default()).await?;
    Ok(())
}
