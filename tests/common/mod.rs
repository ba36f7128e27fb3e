//! Shared in-process plugin doubles for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gatehouse::contract::{Capabilities, Flow, Metadata, Payload, Plugin, PluginConfig};
use gatehouse::proto::{HttpRequest, HttpResponse};
use gatehouse::{PluginInstance, Result};

type Script = Box<dyn Fn(Payload) -> Result<Payload> + Send + Sync>;

/// Scripted plugin double: answers every flow call with a fixed behaviour
/// and records what it saw.
pub struct ScriptedPlugin {
    name: String,
    flows: Vec<Flow>,
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<Payload>>,
}

impl ScriptedPlugin {
    pub fn new(
        name: &str,
        flows: &[Flow],
        script: impl Fn(Payload) -> Result<Payload> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(ScriptedPlugin {
            name: name.to_string(),
            flows: flows.to_vec(),
            script: Box::new(script),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Payload> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, payload: &Payload) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(payload.clone());
    }
}

#[tonic::async_trait]
impl Plugin for ScriptedPlugin {
    fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            ..Default::default()
        }
    }

    fn capabilities(&self) -> Capabilities {
        self.flows.iter().copied().collect()
    }

    async fn configure(&self, _config: PluginConfig) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    async fn ready(&self) -> Result<bool> {
        Ok(true)
    }

    async fn handle_request(&self, payload: Payload) -> Result<Payload> {
        self.record(&payload);
        (self.script)(payload)
    }

    async fn handle_response(&self, payload: Payload) -> Result<Payload> {
        self.record(&payload);
        (self.script)(payload)
    }
}

/// Wraps a double into a registrable instance.
pub fn instance(plugin: &Arc<ScriptedPlugin>, required: bool) -> Arc<PluginInstance> {
    Arc::new(PluginInstance::new(
        Arc::clone(plugin) as Arc<dyn Plugin>,
        PluginConfig::default(),
        required,
    ))
}

/// A response that lets the exchange continue untouched.
pub fn continue_response() -> HttpResponse {
    HttpResponse {
        r#continue: true,
        ..Default::default()
    }
}

/// Double that passes every payload through.
pub fn pass_through(name: &str, flows: &[Flow]) -> Arc<ScriptedPlugin> {
    ScriptedPlugin::new(name, flows, |_| Ok(Payload::Response(continue_response())))
}

/// Double that fails every call with an internal RPC status.
pub fn failing(name: &str, flows: &[Flow]) -> Arc<ScriptedPlugin> {
    ScriptedPlugin::new(name, flows, |_| {
        Err(tonic::Status::internal("scripted failure").into())
    })
}

pub fn get_request(path: &str) -> HttpRequest {
    HttpRequest {
        method: "GET".to_string(),
        url: path.to_string(),
        path: path.to_string(),
        request_uri: path.to_string(),
        ..Default::default()
    }
}
