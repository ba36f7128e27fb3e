//! Plugin process lifecycle.
//!
//! The [`Manager`] owns every plugin child process and its RPC connection.
//! It starts plugins, keeps process control, and can force-kill them at any
//! time; plugins are untrusted third-party code.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::time;
use tonic::transport::Channel;
use tracing::{debug, error, info, warn};

use crate::adapter::GrpcPluginAdapter;
use crate::contract::PluginConfig;
use crate::error::{Error, Result};
use crate::instance::PluginInstance;
use crate::proto::plugin_client::PluginClient;
use crate::transport::{self, Network};

const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Budget for the graceful `Stop` RPC during teardown.
const STOP_RPC_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a stopped plugin may take to exit before SIGKILL.
const EXIT_WAIT: Duration = Duration::from_secs(2);

/// Supervises plugin subprocesses from spawn to teardown.
pub struct Manager {
    plugins: Mutex<HashMap<String, RunningPlugin>>,
    start_timeout: Duration,
    call_timeout: Duration,
}

/// A live plugin: the child process, its RPC client, and the instance handed
/// out at start.
struct RunningPlugin {
    child: Child,
    client: PluginClient<Channel>,
    instance: PluginInstance,
    address: String,
    network: Network,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_START_TIMEOUT, DEFAULT_CALL_TIMEOUT)
    }

    /// Builds a manager with explicit startup budgets: `start_timeout` bounds
    /// the wait for the child to bind its listener, `call_timeout` bounds each
    /// handshake RPC.
    pub fn with_timeouts(start_timeout: Duration, call_timeout: Duration) -> Self {
        Manager {
            plugins: Mutex::new(HashMap::new()),
            start_timeout,
            call_timeout,
        }
    }

    /// Launches a plugin binary, connects to it, and returns its instance.
    ///
    /// The instance comes back with an empty config and `required = false`;
    /// the caller applies registration-time policy before handing it to the
    /// pipeline. Any failure cleans up the child and leaves nothing
    /// registered; already-started plugins are unaffected.
    pub async fn start(&self, binary_path: impl AsRef<Path>) -> Result<PluginInstance> {
        let binary_path = binary_path.as_ref();
        info!(path = %binary_path.display(), "starting plugin");

        let base_name = binary_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plugin".to_string());

        let (address, network) = transport::allocate_address(&base_name)?;
        debug!(%address, network = %network, "transport selected");

        let mut child = Command::new(binary_path)
            .arg("--address")
            .arg(&address)
            .arg("--network")
            .arg(network.as_flag())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        forward_child_output(&mut child, &base_name);
        debug!(pid = ?child.id(), %address, "plugin process started");

        if let Err(err) = transport::await_ready(network, &address, self.start_timeout).await {
            kill_quietly(&mut child).await;
            return Err(err);
        }

        let channel = match transport::connect(network, &address).await {
            Ok(channel) => channel,
            Err(err) => {
                kill_quietly(&mut child).await;
                return Err(Error::Handshake(format!("dialing {address}: {err}")));
            }
        };
        let client = PluginClient::new(channel);

        let adapter = match GrpcPluginAdapter::handshake(client.clone(), self.call_timeout).await {
            Ok(adapter) => adapter,
            Err(err) => {
                kill_quietly(&mut child).await;
                return Err(err);
            }
        };

        let instance = PluginInstance::new(Arc::new(adapter), PluginConfig::default(), false);
        let metadata = instance.metadata();
        info!(
            plugin = %metadata.name,
            version = %metadata.version,
            pid = ?child.id(),
            "plugin started"
        );

        let running = RunningPlugin {
            child,
            client,
            instance: instance.clone(),
            address,
            network,
        };
        self.registry().insert(metadata.name, running);

        Ok(instance)
    }

    /// Returns all started plugin instances.
    pub fn plugins(&self) -> Vec<PluginInstance> {
        self.registry()
            .values()
            .map(|running| running.instance.clone())
            .collect()
    }

    /// Stops all running plugins, force-killing any that linger.
    ///
    /// Graceful-stop and teardown failures are logged and swallowed; the only
    /// reportable failure is a kill that itself fails. Idempotent: a second
    /// call finds an empty registry and returns immediately.
    pub async fn stop_all(&self) -> Result<()> {
        let drained: Vec<RunningPlugin> = {
            let mut registry = self.registry();
            registry.drain().map(|(_, running)| running).collect()
        };

        let mut failures = Vec::new();
        for running in drained {
            let id = running.instance.id().to_string();
            if let Err(err) = stop_plugin(running).await {
                error!(plugin = %id, error = %err, "error stopping plugin");
                failures.push(err);
            }
        }

        match Error::join(failures) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, RunningPlugin>> {
        self.plugins.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn stop_plugin(running: RunningPlugin) -> Result<()> {
    let RunningPlugin {
        mut child,
        client,
        instance,
        address,
        network,
    } = running;
    let id = instance.id().to_string();
    info!(plugin = %id, "stopping plugin");

    let mut rpc = client.clone();
    match time::timeout(STOP_RPC_TIMEOUT, rpc.stop(())).await {
        Ok(Ok(_)) => {}
        Ok(Err(status)) => {
            warn!(plugin = %id, error = %status, "graceful stop failed, force killing");
        }
        Err(_) => {
            warn!(plugin = %id, "graceful stop timed out, force killing");
        }
    }
    drop(rpc);
    drop(client);

    match time::timeout(EXIT_WAIT, child.wait()).await {
        Ok(Ok(status)) => {
            debug!(plugin = %id, ?status, "plugin process exited");
        }
        Ok(Err(err)) => {
            warn!(plugin = %id, error = %err, "failed to observe plugin exit");
        }
        Err(_) => {
            warn!(plugin = %id, "plugin didn't exit, force killing");
            child.start_kill()?;
            let _ = child.wait().await;
        }
    }

    if network == Network::Unix {
        if let Err(err) = std::fs::remove_file(&address) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(plugin = %id, path = %address, error = %err, "failed to remove socket file");
            }
        }
    }

    info!(plugin = %id, "plugin stopped");
    Ok(())
}

async fn kill_quietly(child: &mut Child) {
    if let Err(err) = child.kill().await {
        warn!(error = %err, "failed to kill plugin process");
    }
}

/// Forwards the child's stdout and stderr into the host log, line by line,
/// tagged with the plugin name.
fn forward_child_output(child: &mut Child, plugin: &str) {
    if let Some(stdout) = child.stdout.take() {
        spawn_line_forwarder(stdout, plugin.to_string(), false);
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_line_forwarder(stderr, plugin.to_string(), true);
    }
}

fn spawn_line_forwarder(
    stream: impl AsyncRead + Unpin + Send + 'static,
    plugin: String,
    is_stderr: bool,
) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if is_stderr {
                warn!(plugin = %plugin, "{line}");
            } else {
                info!(plugin = %plugin, "{line}");
            }
        }
    });
}
