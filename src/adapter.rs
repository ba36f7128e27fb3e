//! gRPC-backed implementation of the host plugin contract.

use std::time::Duration;

use tokio::time;
use tonic::transport::Channel;

use crate::contract::{Capabilities, Metadata, Payload, Plugin, PluginConfig};
use crate::error::{Error, Result};
use crate::proto;
use crate::proto::plugin_client::PluginClient;

/// Adapts a remote gRPC plugin to the in-process [`Plugin`] contract.
///
/// Identity and capabilities are fetched exactly once, during
/// [`handshake`](GrpcPluginAdapter::handshake), and served from cache for the
/// life of the connection. Every other method is a unary RPC.
pub struct GrpcPluginAdapter {
    client: PluginClient<Channel>,
    metadata: Metadata,
    capabilities: Capabilities,
}

impl GrpcPluginAdapter {
    /// Performs the startup handshake: fetches metadata and capabilities,
    /// each under `call_timeout`, and rejects plugins declaring no flows.
    pub async fn handshake(
        client: PluginClient<Channel>,
        call_timeout: Duration,
    ) -> Result<Self> {
        let mut rpc = client.clone();

        let metadata = time::timeout(call_timeout, rpc.get_metadata(()))
            .await
            .map_err(|_| Error::Handshake("metadata call timed out".into()))?
            .map_err(|status| Error::Handshake(format!("fetching metadata: {status}")))?
            .into_inner();

        let declared = time::timeout(call_timeout, rpc.get_capabilities(()))
            .await
            .map_err(|_| Error::Handshake("capability call timed out".into()))?
            .map_err(|status| Error::Handshake(format!("fetching capabilities: {status}")))?
            .into_inner();

        let capabilities = Capabilities::from_wire(&declared.flows);
        if capabilities.is_empty() {
            return Err(Error::EmptyCapabilities);
        }

        Ok(GrpcPluginAdapter {
            client,
            metadata: metadata.into(),
            capabilities,
        })
    }
}

#[tonic::async_trait]
impl Plugin for GrpcPluginAdapter {
    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    async fn configure(&self, config: PluginConfig) -> Result<()> {
        let mut client = self.client.clone();
        client.configure(proto::PluginConfig::from(&config)).await?;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let mut client = self.client.clone();
        client.stop(()).await?;
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        let mut client = self.client.clone();
        client.check_health(()).await?;
        Ok(())
    }

    async fn ready(&self) -> Result<bool> {
        let mut client = self.client.clone();
        client.check_ready(()).await?;
        Ok(true)
    }

    async fn handle_request(&self, payload: Payload) -> Result<Payload> {
        let request = payload.into_request()?;
        let mut client = self.client.clone();
        let response = client.handle_request(request).await?;
        Ok(Payload::Response(response.into_inner()))
    }

    async fn handle_response(&self, payload: Payload) -> Result<Payload> {
        let response = payload.into_response()?;
        let mut client = self.client.clone();
        let replaced = client.handle_response(response).await?;
        Ok(Payload::Response(replaced.into_inner()))
    }
}
