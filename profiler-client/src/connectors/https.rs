use super::http::TcpConnector;
use crate::client::Metric;
use crate::error::ClientError;
use crate::target::Target;
use profiler_metrics::{CollectorHandle, Stopwatch};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

/// Client TLS configuration trusting the bundled Mozilla root set.
pub fn default_tls_config() -> Result<ClientConfig, rustls::Error> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}

#[derive(Clone)]
pub struct HttpsConnector {
    tcp: TcpConnector,
    tls_config: Arc<ClientConfig>,
    collector: CollectorHandle<Metric>,
}

impl HttpsConnector {
    pub fn new(
        nodelay: bool,
        collector: CollectorHandle<Metric>,
    ) -> Result<HttpsConnector, ClientError> {
        let config = default_tls_config()?;
        Ok(HttpsConnector::from((
            TcpConnector::new(collector.clone()),
            config,
            collector,
        ))
        .with_nodelay(nodelay))
    }

    fn with_nodelay(mut self, nodelay: bool) -> HttpsConnector {
        self.tcp.set_nodelay(nodelay);
        self
    }

    /// Open a TCP connection to the target and negotiate TLS on it, using the
    /// target host for SNI and certificate verification.
    pub async fn connect(&self, target: &Target) -> Result<TlsStream<TcpStream>, ClientError> {
        let server_name = ServerName::try_from(target.host().to_string())
            .map_err(|_| ClientError::InvalidServerName(target.host().into()))?;
        let tcp = self.tcp.connect(target.host(), target.port()).await?;

        let connector = TlsConnector::from(self.tls_config.clone());
        let stopwatch = Stopwatch::new();
        let tls = connector
            .connect(server_name, tcp)
            .await
            .map_err(|source| ClientError::Tls {
                host: target.host().into(),
                source,
            })?;
        self.collector.send(stopwatch.elapsed_sample(Metric::Tls));
        Ok(tls)
    }
}

impl From<(TcpConnector, ClientConfig, CollectorHandle<Metric>)> for HttpsConnector {
    fn from(args: (TcpConnector, ClientConfig, CollectorHandle<Metric>)) -> HttpsConnector {
        HttpsConnector {
            tcp: args.0,
            tls_config: Arc::new(args.1),
            collector: args.2,
        }
    }
}
