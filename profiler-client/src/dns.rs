use crate::client::Metric;
use std::io;
use std::net::{IpAddr, SocketAddr};
use profiler_metrics::{CollectorHandle, Stopwatch};

#[derive(Clone)]
pub struct TracingResolver {
    collector: CollectorHandle<Metric>,
}

impl TracingResolver {
    pub fn new(collector: CollectorHandle<Metric>) -> TracingResolver {
        TracingResolver { collector }
    }

    /// Resolve `host` to the first address it maps to. IP literals skip the lookup
    /// and aren't timed.
    pub async fn resolve(&self, host: &str, port: u16) -> io::Result<SocketAddr> {
        if let Some(addr) = try_parse_ipaddr(host, port) {
            return Ok(addr);
        }
        let stopwatch = Stopwatch::new();
        let addr = tokio::net::lookup_host((host, port)).await?.next();
        self.collector.send(stopwatch.elapsed_sample(Metric::Dns));
        addr.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Did not resolve an address"))
    }
}

fn try_parse_ipaddr(host: &str, port: u16) -> Option<SocketAddr> {
    host.parse::<IpAddr>()
        .ok()
        .map(|addr| SocketAddr::new(addr, port))
}
