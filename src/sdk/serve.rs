//! Listener setup and shutdown handling for plugin processes.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio::sync::Notify;
use tonic::transport::Server;
use tracing::{info, warn};

use super::{HandlerBridge, PluginHandler};
use crate::error::{Error, Result};
use crate::proto::plugin_server::PluginServer;
use crate::transport::Network;

/// Listener options for a plugin process, as passed by the host.
#[derive(Parser, Debug)]
#[command(about = "gatehouse plugin process", long_about = None)]
pub struct ServeArgs {
    /// Address to bind: a socket path for unix, host:port for tcp.
    #[arg(long)]
    pub address: String,

    /// Transport to bind.
    #[arg(long, value_enum, default_value_t = Network::Unix)]
    pub network: Network,
}

/// Serves a plugin using arguments from the process command line.
pub async fn serve<P: PluginHandler>(handler: P) -> Result<()> {
    serve_with(handler, ServeArgs::parse()).await
}

/// Serves a plugin on an explicit listener.
///
/// Returns once the process should exit: after SIGINT or SIGTERM, or after a
/// graceful `Stop` RPC has completed.
pub async fn serve_with<P: PluginHandler>(handler: P, args: ServeArgs) -> Result<()> {
    info!(address = %args.address, network = %args.network, "starting plugin server");

    let stop_signal = Arc::new(Notify::new());
    let service = PluginServer::new(HandlerBridge::new(handler, Arc::clone(&stop_signal)));

    match args.network {
        Network::Unix => serve_unix(service, &args.address, stop_signal).await,
        Network::Tcp => serve_tcp(service, &args.address, stop_signal).await,
    }
}

#[cfg(unix)]
async fn serve_unix<P: PluginHandler>(
    service: PluginServer<HandlerBridge<P>>,
    address: &str,
    stop_signal: Arc<Notify>,
) -> Result<()> {
    use std::path::PathBuf;

    use tokio::net::UnixListener;
    use tokio_stream::wrappers::UnixListenerStream;

    let path = PathBuf::from(address);
    if path.exists() {
        warn!(path = %address, "removing stale socket file");
        std::fs::remove_file(&path)?;
    }

    let listener = UnixListener::bind(&path)?;
    let incoming = UnixListenerStream::new(listener);

    info!(path = %address, "listening on unix socket");

    Server::builder()
        .add_service(service)
        .serve_with_incoming_shutdown(incoming, shutdown(stop_signal))
        .await?;

    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    Ok(())
}

#[cfg(not(unix))]
async fn serve_unix<P: PluginHandler>(
    _service: PluginServer<HandlerBridge<P>>,
    _address: &str,
    _stop_signal: Arc<Notify>,
) -> Result<()> {
    Err(Error::Configuration(
        "unix sockets are not supported on this platform".into(),
    ))
}

async fn serve_tcp<P: PluginHandler>(
    service: PluginServer<HandlerBridge<P>>,
    address: &str,
    stop_signal: Arc<Notify>,
) -> Result<()> {
    let addr = address
        .parse()
        .map_err(|err| Error::Configuration(format!("invalid tcp address '{address}': {err}")))?;

    info!(%addr, "listening on tcp");

    Server::builder()
        .add_service(service)
        .serve_with_shutdown(addr, shutdown(stop_signal))
        .await?;

    Ok(())
}

/// Resolves on SIGINT, SIGTERM, or a completed graceful stop.
async fn shutdown(stop_signal: Arc<Notify>) {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install interrupt handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("received interrupt, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
        _ = stop_signal.notified() => info!("stop requested by host, shutting down"),
    }
}
