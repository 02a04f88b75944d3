pub mod client;
pub mod connectors;
pub mod dns;
mod error;
pub mod status;
pub mod target;

pub use crate::client::{Client, ClientOptions, Metric, RequestResult, Transport};
pub use crate::error::{ClientError, ErrorKind};
pub use crate::target::{Target, TargetError};
