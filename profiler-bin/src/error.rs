use crate::config::ConfigError;
use profiler_client::{ClientError, ErrorKind, TargetError};
use profiler_metrics::data::ReportError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("{0}")]
    Usage(String),
    #[error("invalid url: {0}")]
    InvalidTarget(#[from] TargetError),
    #[error("{0}\nPlease verify this is a valid HTTPS endpoint")]
    ConnectionFailed(#[source] ClientError),
    #[error("{0}")]
    MalformedResponse(#[source] ClientError),
    #[error("could not load config: {0:#}")]
    Config(anyhow::Error),
    #[error("{0}")]
    EmptyRun(#[from] ReportError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl From<ClientError> for ProfilerError {
    fn from(e: ClientError) -> ProfilerError {
        match e.kind() {
            ErrorKind::ConnectionFailed => ProfilerError::ConnectionFailed(e),
            ErrorKind::MalformedResponse => ProfilerError::MalformedResponse(e),
        }
    }
}

impl From<ConfigError> for ProfilerError {
    fn from(e: ConfigError) -> ProfilerError {
        match e {
            ConfigError::ZeroRepeat => ProfilerError::Usage(e.to_string()),
            ConfigError::ZeroTimeout => ProfilerError::Config(e.into()),
        }
    }
}

impl ProfilerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ProfilerError::Usage(_) | ProfilerError::EmptyRun(_) => 2,
            ProfilerError::InvalidTarget(_) => 3,
            ProfilerError::ConnectionFailed(_) => 4,
            ProfilerError::MalformedResponse(_) => 5,
            ProfilerError::Config(_) => 6,
            ProfilerError::Io(_) => 1,
        }
    }

    /// Bad input gets the usage text; failures during a run only get a diagnostic.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            ProfilerError::Usage(_) | ProfilerError::InvalidTarget(_)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use profiler_client::status::StatusLineError;
    use std::time::Duration;

    #[test]
    fn client_errors_map_to_kinds() {
        let timeout: ProfilerError = ClientError::Timeout {
            host: "example.com".into(),
            port: 443,
            timeout: Duration::from_secs(5),
        }
        .into();
        assert_eq!(timeout.exit_code(), 4);
        assert!(!timeout.shows_usage());

        let malformed: ProfilerError = ClientError::MalformedResponse {
            host: "example.com".into(),
            source: StatusLineError::Empty,
        }
        .into();
        assert_eq!(malformed.exit_code(), 5);
        assert_eq!(
            malformed.to_string(),
            "malformed response from example.com: empty response"
        );
    }

    #[test]
    fn usage_errors() {
        let zero: ProfilerError = ConfigError::ZeroRepeat.into();
        assert_eq!(zero.exit_code(), 2);
        assert!(zero.shows_usage());

        let target: ProfilerError = TargetError::Empty.into();
        assert_eq!(target.exit_code(), 3);
        assert!(target.shows_usage());

        let config: ProfilerError = ConfigError::ZeroTimeout.into();
        assert_eq!(config.exit_code(), 6);
    }
}
