//! Host-internal plugin contract.
//!
//! The wire layer ([`crate::proto`]) is what plugin processes speak; this
//! module is what the rest of the host consumes. The adapter normalises
//! between the two at the process boundary, so nothing above it needs to
//! know a plugin lives in another process.

use std::collections::{HashMap, HashSet};
use std::fmt;

use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::metrics::Meter;

use crate::error::{Error, Result};
use crate::proto;

/// Lifecycle point a plugin can hook: before the application handler runs,
/// or after it has produced a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    Request,
    Response,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Request => f.write_str("request"),
            Flow::Response => f.write_str("response"),
        }
    }
}

/// Functional grouping of plugins sharing one execution policy.
///
/// The six built-in categories have fixed policy rows; anything else parses
/// into [`Category::Custom`], which carries the conservative default policy
/// and is never visited by the pipeline's ordered walk.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Metrics, traces, and logging without blocking requests.
    Observability,
    /// Verifies the identity of the requester.
    Authentication,
    /// Determines whether the authenticated entity may perform the action.
    Authorization,
    /// Enforces request rate limits to prevent abuse.
    RateLimiting,
    /// Checks request structure, schema, or business rules.
    Validation,
    /// Transforms or enriches request/response bodies.
    Content,
    /// Tag with no built-in policy row.
    Custom(String),
}

impl Category {
    pub fn as_tag(&self) -> &str {
        match self {
            Category::Observability => "observability",
            Category::Authentication => "authentication",
            Category::Authorization => "authorization",
            Category::RateLimiting => "rate-limiting",
            Category::Validation => "validation",
            Category::Content => "content",
            Category::Custom(tag) => tag,
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag {
            "observability" => Category::Observability,
            "authentication" => Category::Authentication,
            "authorization" => Category::Authorization,
            "rate-limiting" => Category::RateLimiting,
            "validation" => Category::Validation,
            "content" => Category::Content,
            other => Category::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// How the pipeline runs the plugins within one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One at a time, in registration order.
    Serial,
    /// Concurrently, with no ordering guarantees.
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Serial => f.write_str("serial"),
            ExecutionMode::Parallel => f.write_str("parallel"),
        }
    }
}

/// Execution semantics for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryProperties {
    /// Serial or parallel dispatch.
    pub mode: ExecutionMode,
    /// Whether a failure in this category may fail the whole pipeline.
    pub can_reject: bool,
    /// Whether plugins in this category may substitute the request.
    pub can_modify: bool,
}

/// Static identity information for a plugin, immutable after handshake.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Unique identifier; the host keys its registry on this.
    pub name: String,
    pub version: String,
    pub description: String,
    pub commit_hash: String,
    pub build_date: String,
}

impl From<proto::Metadata> for Metadata {
    fn from(wire: proto::Metadata) -> Self {
        Metadata {
            name: wire.name,
            version: wire.version,
            description: wire.description,
            commit_hash: wire.commit_hash,
            build_date: wire.build_date,
        }
    }
}

/// The set of flows a plugin participates in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    flows: HashSet<Flow>,
}

impl Capabilities {
    /// Normalises wire flow tags, silently dropping unknown values.
    pub fn from_wire(flows: &[i32]) -> Self {
        let flows = flows
            .iter()
            .filter_map(|&raw| match proto::Flow::try_from(raw) {
                Ok(proto::Flow::Request) => Some(Flow::Request),
                Ok(proto::Flow::Response) => Some(Flow::Response),
                _ => None,
            })
            .collect();
        Capabilities { flows }
    }

    pub fn supports(&self, flow: Flow) -> bool {
        self.flows.contains(&flow)
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

impl FromIterator<Flow> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Flow>>(iter: I) -> Self {
        Capabilities {
            flows: iter.into_iter().collect(),
        }
    }
}

/// OpenTelemetry export settings handed to the plugin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint, e.g. `localhost:4317`.
    pub otlp_endpoint: String,
    pub service_name: String,
    pub environment: String,
    /// Fraction of traces to sample, 0.0 to 1.0.
    pub sample_ratio: f64,
}

/// Host-provided configuration for a plugin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PluginConfig {
    pub telemetry: TelemetryConfig,
    /// Plugin-specific settings, forwarded verbatim.
    pub custom: HashMap<String, String>,
}

impl From<&PluginConfig> for proto::PluginConfig {
    fn from(config: &PluginConfig) -> Self {
        proto::PluginConfig {
            telemetry: Some(proto::TelemetryConfig {
                otlp_endpoint: config.telemetry.otlp_endpoint.clone(),
                service_name: config.telemetry.service_name.clone(),
                environment: config.telemetry.environment.clone(),
                sample_ratio: config.telemetry.sample_ratio,
            }),
            custom_config: config.custom.clone(),
        }
    }
}

/// The value flowing through a pipeline run.
///
/// Plugin calls accept and return this sum type instead of a concrete wire
/// message so the interface stays uniform across payload shapes; callers
/// narrow where the concrete type matters.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Request(proto::HttpRequest),
    Response(proto::HttpResponse),
}

impl Payload {
    /// Narrows to the wire request, or fails with the request type error.
    pub fn into_request(self) -> Result<proto::HttpRequest> {
        match self {
            Payload::Request(request) => Ok(request),
            Payload::Response(_) => Err(Error::InvalidRequestType),
        }
    }

    /// Narrows to the wire response, or fails with the response type error.
    pub fn into_response(self) -> Result<proto::HttpResponse> {
        match self {
            Payload::Response(response) => Ok(response),
            Payload::Request(_) => Err(Error::InvalidResponseType),
        }
    }
}

/// The contract every in-process plugin handle fulfils.
///
/// The gRPC adapter is the production implementation; tests provide
/// in-process doubles. `metadata` and `capabilities` are pure reads of
/// values cached at construction and can never block or fail.
#[tonic::async_trait]
pub trait Plugin: Send + Sync {
    /// Static identity information cached at handshake.
    fn metadata(&self) -> Metadata;

    /// Supported flows, cached at handshake. Never empty.
    fn capabilities(&self) -> Capabilities;

    /// Delivers host configuration to the plugin.
    async fn configure(&self, config: PluginConfig) -> Result<()>;

    /// Requests graceful shutdown.
    async fn stop(&self) -> Result<()>;

    /// Errors when the plugin is unhealthy.
    async fn health(&self) -> Result<()>;

    /// True once the plugin can take traffic.
    async fn ready(&self) -> Result<bool>;

    /// Processes an inbound request payload.
    async fn handle_request(&self, payload: Payload) -> Result<Payload>;

    /// Processes an outbound response payload.
    async fn handle_response(&self, payload: Payload) -> Result<Payload>;

    /// Tracer handle for this plugin. No telemetry SDK is installed in the
    /// host, so the default resolves to a no-op; plugins export their own
    /// telemetry out of process.
    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.metadata().name)
    }

    /// Meter handle for this plugin; no-op under the default host setup.
    fn meter(&self) -> Meter {
        global::meter(self.metadata().name)
    }
}
