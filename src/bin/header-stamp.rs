//! Content plugin that stamps every request with an identifying header.

use gatehouse::proto::{Capabilities, Flow, HttpRequest, HttpResponse, Metadata};
use gatehouse::sdk::{serve, PluginHandler};
use tonic::Status;

struct HeaderStamp;

#[tonic::async_trait]
impl PluginHandler for HeaderStamp {
    async fn metadata(&self) -> Metadata {
        Metadata {
            name: "header-stamp".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Stamps requests with an X-Gatehouse-Stamp header".into(),
            ..Default::default()
        }
    }

    async fn capabilities(&self) -> Capabilities {
        Capabilities {
            flows: vec![Flow::Request as i32],
        }
    }

    async fn handle_request(&self, request: HttpRequest) -> Result<HttpResponse, Status> {
        let mut stamped = request;
        stamped
            .headers
            .insert("X-Gatehouse-Stamp".to_string(), "header-stamp".to_string());

        tracing::info!(method = %stamped.method, path = %stamped.path, "stamped request");

        Ok(HttpResponse {
            r#continue: true,
            modified_request: Some(stamped),
            ..Default::default()
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();
    serve(HeaderStamp).await?;
    Ok(())
}
