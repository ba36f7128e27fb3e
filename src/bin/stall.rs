//! Plugin that never completes a graceful stop.
//!
//! Its `stop` handler parks forever, so the host's stop RPC runs out its
//! budget and the exit wait elapses; the process only dies when the
//! supervisor force-kills it. Useful for exercising that path end to end.

use gatehouse::proto::{Capabilities, Flow, HttpRequest, HttpResponse, Metadata};
use gatehouse::sdk::{serve, PluginHandler};
use tonic::Status;

struct Stall;

#[tonic::async_trait]
impl PluginHandler for Stall {
    async fn metadata(&self) -> Metadata {
        Metadata {
            name: "stall".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Ignores graceful stop requests".into(),
            ..Default::default()
        }
    }

    async fn capabilities(&self) -> Capabilities {
        Capabilities {
            flows: vec![Flow::Request as i32],
        }
    }

    async fn stop(&self) -> Result<(), Status> {
        tracing::info!("stop requested; not going anywhere");
        std::future::pending().await
    }

    async fn handle_request(&self, _request: HttpRequest) -> Result<HttpResponse, Status> {
        Ok(HttpResponse {
            r#continue: true,
            ..Default::default()
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();
    serve(Stall).await?;
    Ok(())
}
