//! # gatehouse
//!
//! An HTTP middleware plugin host. Gatehouse discovers executable plugin
//! binaries on disk, launches each as an untrusted child process, speaks a
//! small gRPC protocol to it over a local transport (unix domain sockets, or
//! TCP loopback on Windows), and weaves the live plugin set into the
//! request/response pipeline in front of an application's HTTP handlers.
//! Plugins may reject, pass, or mutate HTTP requests and responses.
//!
//! ## Architecture
//!
//! - [`Manager`] owns every plugin child process: spawn, handshake,
//!   supervision, and graceful stop with a force-kill fallback.
//! - [`GrpcPluginAdapter`] is the stable in-process handle to a remote
//!   plugin: it caches identity and capabilities at handshake and routes
//!   lifecycle, health, and per-flow calls over the RPC connection.
//! - [`Pipeline`] runs each flow over the registered plugins in a fixed
//!   category order, enforcing per-category execution mode (serial or
//!   parallel) and permissions (may-reject, may-modify).
//!
//! ## Hosting plugins
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gatehouse::contract::Category;
//! use gatehouse::{Manager, Pipeline};
//!
//! # async fn run() -> gatehouse::Result<()> {
//! let manager = Manager::new();
//! let pipeline = Pipeline::new();
//!
//! let instance = manager.start("./plugins/bearer-gate").await?;
//! pipeline.register(Category::Authentication, Arc::new(instance));
//!
//! // ... serve HTTP with pipeline::middleware::plugin_middleware ...
//!
//! manager.stop_all().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing plugins
//!
//! Plugin binaries implement [`sdk::PluginHandler`] and call [`sdk::serve`];
//! the host invokes them as `<binary> --address <addr> --network <unix|tcp>`.
//! See the `src/bin/` plugins for complete examples.
//!
//! ## Flows, categories, and policy
//!
//! A plugin declares the flows it participates in — [`contract::Flow::Request`]
//! runs before the application handler, [`contract::Flow::Response`] after —
//! and is registered under a [`contract::Category`] that fixes its execution
//! policy. Categories execute in a fixed order (observability first, content
//! last); within a category, serial plugins run in registration order and a
//! `continue = false` reply short-circuits the whole run. Only the content
//! category may substitute the request, and only in serial mode.

// Generated protobuf code.
#[allow(clippy::all)]
#[allow(missing_docs)]
pub mod proto {
    include!("generated/gatehouse.plugins.v1.rs");
}

pub mod adapter;
pub mod contract;
pub mod discovery;
mod error;
pub mod instance;
pub mod manager;
pub mod pipeline;
pub mod sdk;
pub mod transport;

pub use adapter::GrpcPluginAdapter;
pub use contract::{Payload, Plugin};
pub use error::{Error, Result};
pub use instance::PluginInstance;
pub use manager::Manager;
pub use pipeline::Pipeline;
