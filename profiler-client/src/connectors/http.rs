use crate::client::Metric;
use crate::dns::TracingResolver;
use crate::error::ClientError;
use profiler_metrics::{CollectorHandle, Stopwatch};
use tokio::net::TcpStream;

#[derive(Clone)]
pub struct TcpConnector {
    resolver: TracingResolver,
    collector: CollectorHandle<Metric>,
    nodelay: bool,
}

impl TcpConnector {
    pub fn new(collector: CollectorHandle<Metric>) -> TcpConnector {
        let resolver = TracingResolver::new(collector.clone());
        TcpConnector {
            resolver,
            collector,
            nodelay: false,
        }
    }

    pub fn set_nodelay(&mut self, nodelay: bool) {
        self.nodelay = nodelay;
    }

    pub async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ClientError> {
        let addr = self
            .resolver
            .resolve(host, port)
            .await
            .map_err(|source| ClientError::Resolve {
                host: host.into(),
                source,
            })?;
        let stopwatch = Stopwatch::new();
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| ClientError::Connect { addr, source })?;
        self.collector
            .send(stopwatch.elapsed_sample(Metric::Connection));
        stream
            .set_nodelay(self.nodelay)
            .map_err(|source| ClientError::Connect { addr, source })?;
        Ok(stream)
    }
}
