//! Transport selection and bring-up for plugin processes.
//!
//! Plugins listen on a unix domain socket everywhere except Windows, where
//! TCP loopback is used instead. The host allocates the address, passes it to
//! the child on the command line, and polls until the child has bound it.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use tokio::time;
use tonic::transport::{Channel, Endpoint};

use crate::error::{Error, Result};

/// How often the readiness loop re-dials a plugin address.
const SOCKET_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Budget for each individual readiness dial.
const SOCKET_DIAL_TIMEOUT: Duration = Duration::from_millis(100);

/// Listener transport shared between host and plugin command lines.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Unix domain socket in the OS temp directory.
    Unix,
    /// TCP loopback.
    Tcp,
}

impl Network {
    /// Value passed to plugin binaries via `--network`.
    pub fn as_flag(&self) -> &'static str {
        match self {
            Network::Unix => "unix",
            Network::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Allocates a fresh listener address for a plugin named `plugin_name`.
pub fn allocate_address(plugin_name: &str) -> Result<(String, Network)> {
    if cfg!(windows) {
        loopback_address()
    } else {
        socket_address(plugin_name)
    }
}

fn socket_address(plugin_name: &str) -> Result<(String, Network)> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        % 1_000_000;
    let name = plugin_name.replace(' ', "-");
    let path = std::env::temp_dir().join(format!("plugin-{name}-{nanos}.sock"));
    Ok((path.to_string_lossy().into_owned(), Network::Unix))
}

fn loopback_address() -> Result<(String, Network)> {
    // Bind port zero and read the kernel's pick back; the listener is
    // released before the child starts so the port is free to rebind.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    Ok((format!("localhost:{port}"), Network::Tcp))
}

/// Polls `address` until the plugin has bound it, or `budget` elapses.
pub async fn await_ready(network: Network, address: &str, budget: Duration) -> Result<()> {
    let poll = async {
        let mut ticker = time::interval(SOCKET_POLL_INTERVAL);
        loop {
            ticker.tick().await;
            let dialed = time::timeout(SOCKET_DIAL_TIMEOUT, probe(network, address)).await;
            if matches!(dialed, Ok(Ok(()))) {
                return;
            }
        }
    };

    time::timeout(budget, poll).await.map_err(|_| Error::StartTimeout {
        address: address.to_string(),
        timeout: budget,
    })
}

async fn probe(network: Network, address: &str) -> std::io::Result<()> {
    match network {
        Network::Unix => {
            #[cfg(unix)]
            {
                tokio::net::UnixStream::connect(address).await.map(drop)
            }
            #[cfg(not(unix))]
            {
                Err(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "unix sockets are not supported on this platform",
                ))
            }
        }
        Network::Tcp => tokio::net::TcpStream::connect(address).await.map(drop),
    }
}

/// Opens a plaintext channel to a plugin listener.
pub async fn connect(network: Network, address: &str) -> Result<Channel> {
    match network {
        Network::Unix => connect_unix(address).await,
        Network::Tcp => {
            let channel = Endpoint::from_shared(format!("http://{address}"))?
                .connect()
                .await?;
            Ok(channel)
        }
    }
}

#[cfg(unix)]
async fn connect_unix(address: &str) -> Result<Channel> {
    use hyper_util::rt::TokioIo;
    use std::path::PathBuf;
    use tokio::net::UnixStream;
    use tonic::transport::Uri;
    use tower::service_fn;

    let path = PathBuf::from(address);
    // The endpoint URI is required by the builder but never resolved; the
    // connector dials the socket path directly.
    let channel = Endpoint::from_static("http://[::]:50051")
        .connect_with_connector(service_fn(move |_: Uri| {
            let path = path.clone();
            async move { Ok::<_, std::io::Error>(TokioIo::new(UnixStream::connect(path).await?)) }
        }))
        .await?;
    Ok(channel)
}

#[cfg(not(unix))]
async fn connect_unix(_address: &str) -> Result<Channel> {
    Err(Error::Configuration(
        "unix sockets are not supported on this platform".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn socket_addresses_live_in_the_temp_dir() {
        let (address, network) = allocate_address("bearer-gate").unwrap();
        assert_eq!(network, Network::Unix);
        assert!(address.starts_with(std::env::temp_dir().to_string_lossy().as_ref()));
        assert!(address.contains("plugin-bearer-gate-"));
        assert!(address.ends_with(".sock"));
    }

    #[cfg(unix)]
    #[test]
    fn spaces_in_plugin_names_are_sanitised() {
        let (address, _) = allocate_address("my plugin").unwrap();
        assert!(address.contains("plugin-my-plugin-"));
    }

    #[test]
    fn loopback_addresses_carry_a_concrete_port() {
        let (address, network) = loopback_address().unwrap();
        assert_eq!(network, Network::Tcp);
        let port: u16 = address
            .strip_prefix("localhost:")
            .expect("localhost prefix")
            .parse()
            .expect("numeric port");
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn await_ready_times_out_on_an_unbound_address() {
        let err = await_ready(
            Network::Tcp,
            "127.0.0.1:1",
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::StartTimeout { .. }));
    }
}
