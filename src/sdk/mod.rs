//! Plugin-side runtime.
//!
//! Everything a plugin binary needs: implement [`PluginHandler`] for the
//! plugin's behaviour and hand it to [`serve`]. The runtime parses the
//! `--address`/`--network` flags the host passes, binds the listener, serves
//! the wire protocol, and exits on SIGINT, SIGTERM, or a completed `Stop`
//! RPC.
//!
//! ```rust,no_run
//! use gatehouse::proto::{Capabilities, Flow, Metadata};
//! use gatehouse::sdk::{serve, PluginHandler};
//!
//! struct Passthrough;
//!
//! #[tonic::async_trait]
//! impl PluginHandler for Passthrough {
//!     async fn metadata(&self) -> Metadata {
//!         Metadata {
//!             name: "passthrough".into(),
//!             version: "1.0.0".into(),
//!             ..Default::default()
//!         }
//!     }
//!
//!     async fn capabilities(&self) -> Capabilities {
//!         Capabilities { flows: vec![Flow::Request as i32] }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     serve(Passthrough).await?;
//!     Ok(())
//! }
//! ```

mod serve;

pub use serve::{serve, serve_with, ServeArgs};

use std::sync::Arc;

use tokio::sync::Notify;
use tonic::{Request, Response, Status};

use crate::proto::plugin_server::Plugin as PluginService;
use crate::proto::{Capabilities, HttpRequest, HttpResponse, Metadata, PluginConfig};

/// Behaviour of a plugin binary.
///
/// Every method has a workable default so a plugin overrides only what it
/// does: checks pass, configure and stop are no-ops, and both handlers let
/// traffic through untouched. `metadata` and `capabilities` must be
/// overridden for the host to accept the plugin — it rejects an empty
/// capability set at handshake.
#[tonic::async_trait]
pub trait PluginHandler: Send + Sync + 'static {
    /// Identity reported to the host; the name is the plugin's unique id.
    async fn metadata(&self) -> Metadata {
        Metadata::default()
    }

    /// Flows this plugin takes part in.
    async fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Accepts host configuration, delivered once after the handshake.
    async fn configure(&self, _config: PluginConfig) -> Result<(), Status> {
        Ok(())
    }

    /// Releases resources before shutdown. The process exits soon after.
    async fn stop(&self) -> Result<(), Status> {
        Ok(())
    }

    /// Errors when the plugin is unhealthy.
    async fn health(&self) -> Result<(), Status> {
        Ok(())
    }

    /// Errors until the plugin is ready for traffic.
    async fn ready(&self) -> Result<(), Status> {
        Ok(())
    }

    /// Inspects an inbound request: pass it through, substitute it via
    /// `modified_request`, or short-circuit with `continue = false`.
    async fn handle_request(&self, _request: HttpRequest) -> Result<HttpResponse, Status> {
        Ok(HttpResponse {
            r#continue: true,
            ..Default::default()
        })
    }

    /// Inspects an outbound response before it reaches the client.
    async fn handle_response(&self, response: HttpResponse) -> Result<HttpResponse, Status> {
        Ok(HttpResponse {
            r#continue: true,
            ..response
        })
    }
}

/// Bridges a [`PluginHandler`] onto the generated gRPC service and signals
/// the serve loop once a graceful stop has run.
struct HandlerBridge<P> {
    handler: P,
    stop_signal: Arc<Notify>,
}

impl<P> HandlerBridge<P> {
    fn new(handler: P, stop_signal: Arc<Notify>) -> Self {
        HandlerBridge {
            handler,
            stop_signal,
        }
    }
}

#[tonic::async_trait]
impl<P: PluginHandler> PluginService for HandlerBridge<P> {
    async fn get_metadata(&self, _request: Request<()>) -> Result<Response<Metadata>, Status> {
        Ok(Response::new(self.handler.metadata().await))
    }

    async fn get_capabilities(
        &self,
        _request: Request<()>,
    ) -> Result<Response<Capabilities>, Status> {
        Ok(Response::new(self.handler.capabilities().await))
    }

    async fn configure(&self, request: Request<PluginConfig>) -> Result<Response<()>, Status> {
        self.handler.configure(request.into_inner()).await?;
        Ok(Response::new(()))
    }

    async fn stop(&self, _request: Request<()>) -> Result<Response<()>, Status> {
        self.handler.stop().await?;
        // The reply is still delivered: shutdown is graceful and waits for
        // in-flight calls.
        self.stop_signal.notify_one();
        Ok(Response::new(()))
    }

    async fn check_health(&self, _request: Request<()>) -> Result<Response<()>, Status> {
        self.handler.health().await?;
        Ok(Response::new(()))
    }

    async fn check_ready(&self, _request: Request<()>) -> Result<Response<()>, Status> {
        self.handler.ready().await?;
        Ok(Response::new(()))
    }

    async fn handle_request(
        &self,
        request: Request<HttpRequest>,
    ) -> Result<Response<HttpResponse>, Status> {
        let response = self.handler.handle_request(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn handle_response(
        &self,
        request: Request<HttpResponse>,
    ) -> Result<Response<HttpResponse>, Status> {
        let response = self.handler.handle_response(request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
