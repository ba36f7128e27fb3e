//! The per-request/per-response execution engine.
//!
//! A [`Pipeline`] hosts registered plugins grouped by category and runs them
//! in the fixed category order for a given flow, enforcing each category's
//! execution mode and permissions. It borrows plugin handles; it never stops
//! or closes them — that is the manager's job.

pub mod categories;
pub mod middleware;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::future::join_all;
use tracing::{debug, error};

use crate::contract::{Category, CategoryProperties, ExecutionMode, Flow, Payload};
use crate::error::{Error, Result};
use crate::instance::PluginInstance;
use crate::proto::{HttpRequest, HttpResponse};

use self::categories::{CategoryPolicies, ORDERED_CATEGORIES};

/// Outcome of one serial category: either a plugin demanded an immediate
/// response, or the (possibly substituted) payload moves on.
enum SerialOutcome {
    ShortCircuit(HttpResponse),
    Continue(Payload),
}

/// Hosts registered plugins grouped by category and runs flows over them.
///
/// Registration happens during startup; afterwards the registry is treated
/// as immutable and a single pipeline serves concurrent HTTP exchanges.
pub struct Pipeline {
    plugins: RwLock<HashMap<Category, Vec<Arc<PluginInstance>>>>,
    policies: CategoryPolicies,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_policies(CategoryPolicies::default())
    }

    /// Builds a pipeline with an explicit policy table. Production uses the
    /// default table; tests inject variants to exercise policy handling.
    pub fn with_policies(policies: CategoryPolicies) -> Self {
        Pipeline {
            plugins: RwLock::new(HashMap::new()),
            policies,
        }
    }

    /// Appends a plugin to a category. Order within a category is execution
    /// order for serial dispatch.
    pub fn register(&self, category: Category, plugin: Arc<PluginInstance>) {
        self.registry_mut().entry(category).or_default().push(plugin);
    }

    /// Runs one flow over all registered plugins in category order.
    ///
    /// Returns the plugin response that short-circuited the run, or the
    /// final payload (substituted along the way if a modifying category
    /// replaced the request).
    pub async fn run(&self, flow: Flow, mut payload: Payload) -> Result<Payload> {
        for category in &ORDERED_CATEGORIES {
            let active = self.active_plugins(category, flow);
            if active.is_empty() {
                debug!(category = %category, "no active plugins");
                continue;
            }

            let props = self.policies.props_for(category);
            match props.mode {
                ExecutionMode::Serial => {
                    match self.run_serial(flow, category, props, active, payload).await? {
                        SerialOutcome::ShortCircuit(response) => {
                            return Ok(Payload::Response(response));
                        }
                        SerialOutcome::Continue(next) => payload = next,
                    }
                }
                ExecutionMode::Parallel => {
                    // Concurrent fan-out over a shared payload; mutation
                    // would race, so the combination is rejected outright.
                    if props.can_modify {
                        return Err(Error::Configuration(format!(
                            "parallel execution and request mutation are mutually exclusive: '{category}'"
                        )));
                    }
                    self.run_parallel(flow, category, props, active, &payload).await?;
                }
            }
        }

        Ok(payload)
    }

    /// Runs the REQUEST flow.
    ///
    /// A short-circuiting plugin's response comes back verbatim with
    /// `continue == false`. Otherwise the synthesized verdict carries
    /// `continue == true`, with `modified_request` set when a modifying
    /// category substituted the request — the caller hands that substitute
    /// to the application handler.
    pub async fn run_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let original = request.clone();
        match self.run(Flow::Request, Payload::Request(request)).await? {
            Payload::Response(response) => Ok(response),
            Payload::Request(final_request) => Ok(HttpResponse {
                r#continue: true,
                modified_request: (final_request != original).then_some(final_request),
                ..Default::default()
            }),
        }
    }

    /// Runs the RESPONSE flow, returning the short-circuit response if one
    /// was produced and the input response otherwise.
    pub async fn run_response(&self, response: HttpResponse) -> Result<HttpResponse> {
        let original = response.clone();
        match self.run(Flow::Response, Payload::Response(response)).await? {
            Payload::Response(out) => Ok(out),
            Payload::Request(_) => Ok(original),
        }
    }

    async fn run_serial(
        &self,
        flow: Flow,
        category: &Category,
        props: CategoryProperties,
        active: Vec<Arc<PluginInstance>>,
        mut payload: Payload,
    ) -> Result<SerialOutcome> {
        for plugin in active {
            let outcome = dispatch(&plugin, flow, payload.clone()).await;
            match outcome {
                Ok(Payload::Response(response)) => {
                    if !response.r#continue {
                        return Ok(SerialOutcome::ShortCircuit(response));
                    }
                    // Substitution applies to the REQUEST flow only; a
                    // modified_request in RESPONSE flow is ignored.
                    if props.can_modify && flow == Flow::Request {
                        if let Some(modified) = response.modified_request {
                            payload = Payload::Request(modified);
                        }
                    }
                }
                Ok(Payload::Request(_)) => {}
                Err(err) => {
                    apply_error_policy(&plugin, flow, category, props, err)?;
                }
            }
        }
        Ok(SerialOutcome::Continue(payload))
    }

    async fn run_parallel(
        &self,
        flow: Flow,
        category: &Category,
        props: CategoryProperties,
        active: Vec<Arc<PluginInstance>>,
        payload: &Payload,
    ) -> Result<()> {
        let calls = active.into_iter().map(|plugin| {
            let payload = payload.clone();
            async move {
                let outcome = dispatch(&plugin, flow, payload).await;
                (plugin, outcome)
            }
        });

        // join_all yields results in dispatch order, which keeps the joined
        // error deterministic.
        let mut failures = Vec::new();
        for (plugin, outcome) in join_all(calls).await {
            if let Err(err) = outcome {
                if let Err(fatal) = apply_error_policy(&plugin, flow, category, props, err) {
                    failures.push(fatal);
                }
            }
        }

        match Error::join(failures) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn active_plugins(&self, category: &Category, flow: Flow) -> Vec<Arc<PluginInstance>> {
        self.registry()
            .get(category)
            .map(|plugins| {
                plugins
                    .iter()
                    .filter(|plugin| plugin.can_handle(flow))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn registry(&self) -> RwLockReadGuard<'_, HashMap<Category, Vec<Arc<PluginInstance>>>> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, HashMap<Category, Vec<Arc<PluginInstance>>>> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn dispatch(plugin: &PluginInstance, flow: Flow, payload: Payload) -> Result<Payload> {
    match flow {
        Flow::Request => plugin.handle_request(payload).await,
        Flow::Response => plugin.handle_response(payload).await,
    }
}

/// When a plugin call fails: a required plugin fails the pipeline, a
/// reject-capable category aborts it, and anything else is logged and
/// skipped.
fn apply_error_policy(
    plugin: &PluginInstance,
    flow: Flow,
    category: &Category,
    props: CategoryProperties,
    err: Error,
) -> Result<()> {
    if plugin.required() {
        return Err(Error::RequiredPluginFailed {
            plugin: plugin.id().to_string(),
            source: Box::new(err),
        });
    }
    if props.can_reject {
        return Err(Error::PipelineAborted {
            plugin: plugin.id().to_string(),
            source: Box::new(err),
        });
    }
    error!(
        flow = %flow,
        category = %category,
        mode = %props.mode,
        plugin = %plugin.id(),
        error = %err,
        "plugin failed to handle payload"
    );
    Ok(())
}
