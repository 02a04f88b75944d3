use crate::util;
use std::fmt::Display;
use std::hash::Hash;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    key: T,
    count: Option<u64>,
    gauge: Option<u64>,
}

impl<T: Eq + Hash + Display + Send + Clone> Snapshot<T> {
    pub fn new(key: T, count: Option<u64>, gauge: Option<u64>) -> Snapshot<T> {
        Snapshot { key, count, gauge }
    }

    pub fn key(&self) -> T {
        self.key.clone()
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn gauge(&self) -> Option<u64> {
        self.gauge
    }

    pub fn gauge_as_duration(&self) -> Option<Duration> {
        self.gauge.map(util::u64_to_dur)
    }
}
