use std::net::SocketAddr;
use thiserror::Error;

/// Failures talking to the relay event loop.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay event loop is not running")]
    Closed,

    #[error("relay dropped the reply before answering")]
    NoReply,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind signaling server to {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("signaling server stopped: {0}")]
    Io(#[from] std::io::Error),
}
