use std::time::Duration;

use thiserror::Error;

/// Error types for host operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A payload other than an HTTP request was handed to `handle_request`.
    #[error("invalid request type for plugin")]
    InvalidRequestType,

    /// A payload other than an HTTP response was handed to `handle_response`.
    #[error("invalid response type for plugin")]
    InvalidResponseType,

    /// The plugin declared no supported flows at handshake.
    #[error("plugin returned empty capabilities")]
    EmptyCapabilities,

    /// The plugin process never bound its listener address.
    #[error("plugin did not bind {address} within {timeout:?}")]
    StartTimeout { address: String, timeout: Duration },

    /// Dial, metadata, or capability exchange failed during startup.
    #[error("plugin handshake failed: {0}")]
    Handshake(String),

    /// A plugin flagged `required` failed while handling a flow.
    #[error("required plugin '{plugin}' failed")]
    RequiredPluginFailed {
        plugin: String,
        #[source]
        source: Box<Error>,
    },

    /// A plugin in a reject-capable category failed, aborting the pipeline.
    #[error("plugin '{plugin}' aborted the pipeline")]
    PipelineAborted {
        plugin: String,
        #[source]
        source: Box<Error>,
    },

    /// Incoherent category policy or malformed host configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A unary RPC to the plugin returned an error status.
    #[error(transparent)]
    Rpc(#[from] tonic::Status),

    /// gRPC transport error.
    #[error(transparent)]
    Transport(#[from] tonic::transport::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Several plugins failed in one parallel category, in dispatch order.
    #[error("{}", format_failures(.0))]
    Aggregate(Vec<Error>),
}

impl Error {
    /// Collapses a batch of failures: none is `None`, a single failure stays
    /// itself, more become [`Error::Aggregate`] preserving order.
    pub(crate) fn join(mut errors: Vec<Error>) -> Option<Error> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Error::Aggregate(errors)),
        }
    }

    /// True when this error, or any aggregated member, is a required-plugin
    /// failure.
    pub fn is_required_failure(&self) -> bool {
        match self {
            Error::RequiredPluginFailed { .. } => true,
            Error::Aggregate(errors) => errors.iter().any(Error::is_required_failure),
            _ => false,
        }
    }
}

fn format_failures(errors: &[Error]) -> String {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} plugin failures: {joined}", errors.len())
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_of_nothing_is_none() {
        assert!(Error::join(Vec::new()).is_none());
    }

    #[test]
    fn join_of_one_keeps_the_error() {
        let joined = Error::join(vec![Error::InvalidRequestType]).unwrap();
        assert!(matches!(joined, Error::InvalidRequestType));
    }

    #[test]
    fn join_of_many_aggregates_in_order() {
        let joined = Error::join(vec![Error::InvalidRequestType, Error::EmptyCapabilities]).unwrap();
        let Error::Aggregate(members) = joined else {
            panic!("expected aggregate");
        };
        assert!(matches!(members[0], Error::InvalidRequestType));
        assert!(matches!(members[1], Error::EmptyCapabilities));
    }

    #[test]
    fn required_failure_is_detected_inside_aggregates() {
        let required = Error::RequiredPluginFailed {
            plugin: "audit".into(),
            source: Box::new(Error::InvalidRequestType),
        };
        assert!(required.is_required_failure());
        assert!(Error::Aggregate(vec![Error::EmptyCapabilities, required]).is_required_failure());
        assert!(!Error::EmptyCapabilities.is_required_failure());
    }
}
