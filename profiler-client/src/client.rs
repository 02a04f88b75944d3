use crate::connectors::HttpsConnector;
use crate::error::ClientError;
use crate::status;
use crate::target::Target;
use async_trait::async_trait;
use http::StatusCode;
use profiler_metrics::data::Snapshot;
use profiler_metrics::{util, Collector, CollectorHandle, Interest, Stopwatch};
use slog::{o, Logger};
use std::fmt;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Dns,
    Connection,
    Tls,
    FullResponse,
    ResponseLen,
}

impl Metric {
    pub fn all_metrics(collector: &Collector<Metric>) -> Vec<Snapshot<Metric>> {
        static ALL_METRICS: &[Metric] = &[
            Metric::Dns,
            Metric::Connection,
            Metric::Tls,
            Metric::FullResponse,
            Metric::ResponseLen,
        ];
        ALL_METRICS.iter().map(|m| collector.snapshot(m)).collect()
    }

    pub fn is_latency(&self) -> bool {
        *self != Metric::ResponseLen
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", &self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Bounds DNS resolution, the TCP connect and the TLS handshake together.
    /// Reading the response has no deadline.
    pub connect_timeout: Duration,
    pub nodelay: bool,
}

impl Default for ClientOptions {
    fn default() -> ClientOptions {
        ClientOptions {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            nodelay: true,
        }
    }
}

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    /// The raw response exactly as read: status line, headers and body.
    pub body: Vec<u8>,
    pub status: StatusCode,
    /// From the start of the connection attempt until the peer closed the connection.
    pub latency: Duration,
}

impl RequestResult {
    pub fn latency_millis(&self) -> u64 {
        util::dur_to_millis(self.latency)
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Sends one request over a fresh connection and measures it.
#[async_trait]
pub trait Transport {
    async fn send_request(&self, target: &Target) -> Result<RequestResult, ClientError>;
}

pub struct Client {
    connector: HttpsConnector,
    connect_timeout: Duration,
    collector: CollectorHandle<Metric>,
    logger: Logger,
}

impl Client {
    pub fn configure_collector_defaults(collector: &mut Collector<Metric>) {
        collector.register(Interest::Count(Metric::Dns));
        collector.register(Interest::Count(Metric::Connection));
        collector.register(Interest::Count(Metric::Tls));
        collector.register(Interest::Count(Metric::FullResponse));
        collector.register(Interest::Count(Metric::ResponseLen));

        collector.register(Interest::Gauge(Metric::Dns));
        collector.register(Interest::Gauge(Metric::Connection));
        collector.register(Interest::Gauge(Metric::Tls));
        collector.register(Interest::Gauge(Metric::FullResponse));
        collector.register(Interest::Gauge(Metric::ResponseLen));
    }

    pub fn new_with_collector_handle(
        options: ClientOptions,
        handle: CollectorHandle<Metric>,
        logger: &Logger,
    ) -> Result<Client, ClientError> {
        let connector = HttpsConnector::new(options.nodelay, handle.clone())?;
        Ok(Client::with_connector(
            connector,
            options.connect_timeout,
            handle,
            logger,
        ))
    }

    /// Build a client around an existing connector, e.g. one with its own TLS roots.
    pub fn with_connector(
        connector: HttpsConnector,
        connect_timeout: Duration,
        handle: CollectorHandle<Metric>,
        logger: &Logger,
    ) -> Client {
        Client {
            connector,
            connect_timeout,
            collector: handle,
            logger: logger.new(o!("component" => "client")),
        }
    }

    pub fn new_with_collector(
        options: ClientOptions,
        collector: &mut Collector<Metric>,
        logger: &Logger,
    ) -> Result<Client, ClientError> {
        Client::configure_collector_defaults(collector);
        Client::new_with_collector_handle(options, collector.handle(), logger)
    }

    pub fn new_client_and_collector(
        options: ClientOptions,
        logger: &Logger,
    ) -> Result<(Client, Collector<Metric>), ClientError> {
        let mut collector = Collector::new();
        let client = Client::new_with_collector(options, &mut collector, logger)?;
        Ok((client, collector))
    }
}

#[async_trait]
impl Transport for Client {
    async fn send_request(&self, target: &Target) -> Result<RequestResult, ClientError> {
        let stopwatch = Stopwatch::new();
        let connecting = tokio::time::timeout(self.connect_timeout, self.connector.connect(target));
        let mut stream = match connecting.await {
            Ok(stream) => stream?,
            Err(_) => {
                return Err(ClientError::Timeout {
                    host: target.host().into(),
                    port: target.port(),
                    timeout: self.connect_timeout,
                })
            }
        };
        slog::trace!(self.logger, "connected"; "host" => target.host(), "port" => target.port());

        let mut response = Vec::new();
        let exchanged = exchange(&mut stream, target.request_line().as_bytes(), &mut response).await;
        let latency = stopwatch.elapsed();
        // best effort close_notify, the peer has usually hung up already
        let _ = stream.shutdown().await;
        drop(stream);
        exchanged.map_err(|source| ClientError::Io {
            host: target.host().into(),
            source,
        })?;

        self.collector.send_elapsed(Metric::FullResponse, latency);
        self.collector
            .send_value(Metric::ResponseLen, response.len() as u64);

        let status =
            status::parse_status_code(&response).map_err(|source| ClientError::MalformedResponse {
                host: target.host().into(),
                source,
            })?;
        Ok(RequestResult {
            body: response,
            status,
            latency,
        })
    }
}

/// Write the request and read until the peer closes the connection.
///
/// Peers that close the socket without a TLS close_notify after sending data
/// still count as a complete response.
async fn exchange<S>(stream: &mut S, request: &[u8], response: &mut Vec<u8>) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await?;
    stream.flush().await?;
    match stream.read_to_end(response).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !response.is_empty() => Ok(()),
        Err(e) => Err(e),
    }
}
