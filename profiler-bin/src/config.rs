use anyhow::Context;
use profiler_client::{ClientOptions, Target};
use serde::Deserialize;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Optional TOML settings for the client.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub connect_timeout_secs: Option<u64>,
    pub nodelay: Option<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("connect_timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("the number of requests to profile must be at least 1")]
    ZeroRepeat,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<FileConfig> {
        let path = path.as_ref();
        let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: FileConfig =
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn client_options(&self) -> Result<ClientOptions, ConfigError> {
        let defaults = ClientOptions::default();
        let connect_timeout = match self.connect_timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.connect_timeout,
        };
        Ok(ClientOptions {
            connect_timeout,
            nodelay: self.nodelay.unwrap_or(defaults.nodelay),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One request, response written out verbatim
    Single,
    /// Repeated requests summarized into a report
    Profile,
}

/// A validated run: what to request and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    target: Target,
    mode: Mode,
    repeat: usize,
}

impl RunConfig {
    pub fn single(target: Target) -> RunConfig {
        RunConfig {
            target,
            mode: Mode::Single,
            repeat: 1,
        }
    }

    pub fn profile(target: Target, repeat: usize) -> Result<RunConfig, ConfigError> {
        if repeat == 0 {
            return Err(ConfigError::ZeroRepeat);
        }
        Ok(RunConfig {
            target,
            mode: Mode::Profile,
            repeat,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of requests the run will send; always at least 1.
    pub fn repeat(&self) -> usize {
        self.repeat
    }
}
