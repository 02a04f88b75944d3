mod collector;
mod counter;
mod gauge;
mod sample;
mod series;
mod snapshots;
mod stopwatch;
mod summary;
pub mod util;

pub use self::collector::{Collector, CollectorHandle, Interest};
pub use self::stopwatch::Stopwatch;
pub mod data {
    pub use crate::sample::{Sample, SampleValue};
    pub use crate::series::ResultSeries;
    pub use crate::snapshots::Snapshot;
    pub use crate::summary::{ProfileReport, ReportError};
}
