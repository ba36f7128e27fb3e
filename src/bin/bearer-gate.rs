//! Authentication plugin that admits only configured bearer tokens.

use std::collections::{HashMap, HashSet};

use gatehouse::proto::{
    Capabilities, Flow, HttpRequest, HttpResponse, Metadata, PluginConfig,
};
use gatehouse::sdk::{serve, PluginHandler};
use tokio::sync::RwLock;
use tonic::Status;

struct BearerGate {
    valid_tokens: RwLock<HashSet<String>>,
}

impl BearerGate {
    fn new() -> Self {
        // Demo tokens; replaced wholesale when the host configures us.
        let tokens = HashSet::from(["demo-token-123".to_string()]);
        BearerGate {
            valid_tokens: RwLock::new(tokens),
        }
    }

    fn unauthorized() -> HttpResponse {
        let body = serde_json::json!({
            "error": "unauthorized",
            "message": "Valid Bearer token required"
        });
        let headers = HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "WWW-Authenticate".to_string(),
                "Bearer realm=\"gatehouse\"".to_string(),
            ),
        ]);

        HttpResponse {
            r#continue: false,
            status_code: 401,
            headers,
            body: body.to_string().into_bytes(),
            ..Default::default()
        }
    }
}

#[tonic::async_trait]
impl PluginHandler for BearerGate {
    async fn metadata(&self) -> Metadata {
        Metadata {
            name: "bearer-gate".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Rejects requests without a known bearer token".into(),
            ..Default::default()
        }
    }

    async fn capabilities(&self) -> Capabilities {
        Capabilities {
            flows: vec![Flow::Request as i32],
        }
    }

    async fn configure(&self, config: PluginConfig) -> Result<(), Status> {
        if let Some(tokens) = config.custom_config.get("valid_tokens") {
            let mut valid = self.valid_tokens.write().await;
            valid.clear();
            valid.extend(tokens.split(',').map(str::trim).map(String::from));
            tracing::info!(count = valid.len(), "loaded tokens from config");
        }
        Ok(())
    }

    async fn handle_request(&self, request: HttpRequest) -> Result<HttpResponse, Status> {
        // Probes stay open so the host can always reach its own health
        // endpoints.
        if request.path == "/health" || request.path == "/ready" {
            return Ok(HttpResponse {
                r#continue: true,
                ..Default::default()
            });
        }

        let token = request
            .headers
            .get("Authorization")
            .or_else(|| request.headers.get("authorization"))
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if self.valid_tokens.read().await.contains(token) => {
                Ok(HttpResponse {
                    r#continue: true,
                    ..Default::default()
                })
            }
            Some(_) => {
                tracing::warn!(path = %request.path, "rejected unknown token");
                Ok(Self::unauthorized())
            }
            None => {
                tracing::warn!(path = %request.path, "rejected missing token");
                Ok(Self::unauthorized())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();
    serve(BearerGate::new()).await?;
    Ok(())
}
