use crate::counter::Counters;
use crate::gauge::Gauges;
use crate::sample::Sample;
use crate::snapshots::Snapshot;
use crate::util;
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::fmt::Display;
use std::hash::Hash;
use std::time::Duration;

#[derive(Debug)]
pub enum Interest<T> {
    Count(T),
    Gauge(T),
}

pub struct Collector<T> {
    counters: Counters<T>,
    gauges: Gauges<T>,
    tx: Sender<Sample<T>>,
    rx: Receiver<Sample<T>>,
}

impl<T> Default for Collector<T>
where
    T: Hash + Eq + Send + Display + Clone,
{
    fn default() -> Self {
        Collector::new()
    }
}

impl<T> Collector<T>
where
    T: Hash + Eq + Send + Display + Clone,
{
    pub fn new() -> Collector<T> {
        let (tx, rx) = unbounded();
        Collector {
            counters: Counters::new(),
            gauges: Gauges::new(),
            tx,
            rx,
        }
    }

    pub fn register(&mut self, ty: Interest<T>) {
        use self::Interest::*;
        match ty {
            Count(key) => self.counters.init(key),
            Gauge(key) => self.gauges.init(key),
        }
    }

    pub fn handle(&self) -> CollectorHandle<T> {
        CollectorHandle {
            sender: self.tx.clone(),
        }
    }

    /// Fold every sample sent since the last call into the registered meters.
    pub fn process_outstanding(&mut self) {
        while let Ok(sample) = self.rx.try_recv() {
            let key = sample.key();
            use crate::sample::SampleValue::*;
            match sample.value {
                Elapsed(d) => {
                    self.counters.increment(&key);
                    self.gauges.set(&key, util::dur_to_u64(d));
                }
                Value(v) => {
                    self.counters.increment(&key);
                    self.gauges.set(&key, v);
                }
            }
        }
    }

    pub fn snapshot(&self, key: &T) -> Snapshot<T> {
        Snapshot::new(key.clone(), self.counters.get(key), self.gauges.get(key))
    }
}

#[derive(Debug, Clone)]
pub struct CollectorHandle<T> {
    sender: Sender<Sample<T>>,
}

impl<T: Hash + Eq + Send + Display + Clone> CollectorHandle<T> {
    /// Samples sent after the owning `Collector` is dropped are discarded.
    pub fn send(&self, sample: Sample<T>) {
        let _ = self.sender.send(sample);
    }

    pub fn send_elapsed(&self, key: T, d: Duration) {
        self.send(Sample::elapsed(key, d))
    }

    pub fn send_value(&self, key: T, v: u64) {
        self.send(Sample::value(key, v))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Phase,
        Size,
        Ignored,
    }

    impl fmt::Display for Key {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn collector() -> Collector<Key> {
        let mut c = Collector::new();
        c.register(Interest::Count(Key::Phase));
        c.register(Interest::Gauge(Key::Phase));
        c.register(Interest::Count(Key::Size));
        c.register(Interest::Gauge(Key::Size));
        c
    }

    #[test]
    fn gauges_keep_last_value() {
        let mut c = collector();
        let handle = c.handle();
        handle.send_elapsed(Key::Phase, Duration::from_millis(3));
        handle.send_elapsed(Key::Phase, Duration::from_millis(7));
        handle.send_value(Key::Size, 512);
        c.process_outstanding();

        let phase = c.snapshot(&Key::Phase);
        assert_eq!(phase.count(), Some(2));
        assert_eq!(phase.gauge_as_duration(), Some(Duration::from_millis(7)));
        let size = c.snapshot(&Key::Size);
        assert_eq!(size.count(), Some(1));
        assert_eq!(size.gauge(), Some(512));
    }

    #[test]
    fn unregistered_keys_are_ignored() {
        let mut c = collector();
        c.handle().send_value(Key::Ignored, 1);
        c.process_outstanding();
        let s = c.snapshot(&Key::Ignored);
        assert_eq!(s.count(), None);
        assert_eq!(s.gauge(), None);
    }

    #[test]
    fn nothing_is_folded_before_processing() {
        let c = collector();
        c.handle().send_value(Key::Size, 10);
        assert_eq!(c.snapshot(&Key::Size).count(), Some(0));
    }
}
