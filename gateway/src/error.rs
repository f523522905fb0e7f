use thiserror::Error;

/// Failures that stop the HTTP gateway from serving.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
