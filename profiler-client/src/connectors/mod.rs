pub mod http;
pub mod https;

pub use self::http::TcpConnector;
pub use self::https::{default_tls_config, HttpsConnector};
