use crate::status::StatusLineError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Broad classes of request failure. Both abort a profiling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConnectionFailed,
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("timed out after {timeout:?} connecting to {host}:{port}")]
    Timeout {
        host: String,
        port: u16,
        timeout: Duration,
    },
    #[error("could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("could not connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("invalid TLS server name '{0}'")]
    InvalidServerName(String),
    #[error("could not set up TLS: {0}")]
    TlsConfig(#[from] rustls::Error),
    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("I/O error talking to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed response from {host}: {source}")]
    MalformedResponse {
        host: String,
        #[source]
        source: StatusLineError,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            _ => ErrorKind::ConnectionFailed,
        }
    }
}
