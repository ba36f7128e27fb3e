//! Registered plugin handles.

use std::fmt;
use std::sync::Arc;

use crate::contract::{Capabilities, Flow, Metadata, Payload, Plugin, PluginConfig};
use crate::error::Result;

/// A plugin as the host sees it after registration: the live handle plus the
/// registration-time policy (stable id, per-plugin config, required flag).
///
/// The id is the metadata name observed when the plugin started; it never
/// changes afterwards and is what logs and teardown refer to.
#[derive(Clone)]
pub struct PluginInstance {
    plugin: Arc<dyn Plugin>,
    id: String,
    config: PluginConfig,
    required: bool,
}

impl PluginInstance {
    pub fn new(plugin: Arc<dyn Plugin>, config: PluginConfig, required: bool) -> Self {
        let id = plugin.metadata().name;
        PluginInstance {
            plugin,
            id,
            config,
            required,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Marks the instance as required; its failures fail the whole pipeline.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether the plugin declared support for `flow` at handshake.
    pub fn can_handle(&self, flow: Flow) -> bool {
        self.plugin.capabilities().supports(flow)
    }

    pub fn metadata(&self) -> Metadata {
        self.plugin.metadata()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.plugin.capabilities()
    }

    /// Forwards the registration-time config to the plugin.
    pub async fn configure(&self) -> Result<()> {
        self.plugin.configure(self.config.clone()).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.plugin.stop().await
    }

    pub async fn health(&self) -> Result<()> {
        self.plugin.health().await
    }

    pub async fn ready(&self) -> Result<bool> {
        self.plugin.ready().await
    }

    pub async fn handle_request(&self, payload: Payload) -> Result<Payload> {
        self.plugin.handle_request(payload).await
    }

    pub async fn handle_response(&self, payload: Payload) -> Result<Payload> {
        self.plugin.handle_response(payload).await
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInstance")
            .field("id", &self.id)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}
