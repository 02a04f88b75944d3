use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HTTPS_PORT: u16 = 443;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("no host given")]
    Empty,
    #[error("invalid host '{0}'")]
    InvalidHost(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("invalid path '{0}'")]
    InvalidPath(String),
}

/// Where requests are sent: a host reached over TLS and the path to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: u16,
    path: String,
}

impl Target {
    /// Parse a url or bare host such as `https://www.example.com/some/path`,
    /// `example.com` or `localhost:8443/`.
    ///
    /// Any `http://` or `https://` scheme is dropped (requests always go over TLS),
    /// the host is lower-cased and the path defaults to `/`.
    pub fn parse(raw: &str) -> Result<Target, TargetError> {
        let raw = raw.trim();
        let without_scheme = strip_scheme(raw);
        let (authority, path) = match without_scheme.find('/') {
            Some(idx) => without_scheme.split_at(idx),
            None => (without_scheme, "/"),
        };
        if authority.is_empty() {
            return Err(TargetError::Empty);
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let parsed = port
                    .parse::<u16>()
                    .ok()
                    .filter(|&p| p != 0)
                    .ok_or_else(|| TargetError::InvalidPort(port.into()))?;
                (host, Some(parsed))
            }
            None => (authority, None),
        };

        let host = host.to_ascii_lowercase();
        if !valid_host(&host) || (port.is_none() && !host.contains('.')) {
            return Err(TargetError::InvalidHost(host));
        }
        if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TargetError::InvalidPath(path.into()));
        }

        Ok(Target {
            host,
            port: port.unwrap_or(HTTPS_PORT),
            path: path.into(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the `Host` header; the port is only spelled out when it isn't 443.
    pub fn host_header(&self) -> String {
        if self.port == HTTPS_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The complete HTTP/1.0 request written to the connection.
    pub fn request_line(&self) -> String {
        format!(
            "GET {} HTTP/1.0\r\nHost: {}\r\n\r\n",
            self.path,
            self.host_header()
        )
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Target, TargetError> {
        Target::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "https://{}{}", self.host_header(), self.path)
    }
}

fn strip_scheme(raw: &str) -> &str {
    for scheme in &["https://", "http://"] {
        match raw.get(..scheme.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => return &raw[scheme.len()..],
            _ => {}
        }
    }
    raw
}

fn valid_host(host: &str) -> bool {
    let edge = |c: char| c == '.' || c == '-';
    host.len() >= 2
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || edge(c))
        && !host.starts_with(edge)
        && !host.ends_with(edge)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bare_host_defaults_to_root() {
        let t = Target::parse("www.example.com").unwrap();
        assert_eq!(t.host(), "www.example.com");
        assert_eq!(t.port(), 443);
        assert_eq!(t.path(), "/");
    }

    #[test]
    fn scheme_is_dropped_and_path_kept() {
        let t = Target::parse("HTTPS://Example.COM/Docs/index.html?q=1").unwrap();
        assert_eq!(t.host(), "example.com");
        assert_eq!(t.path(), "/Docs/index.html?q=1");

        let t = Target::parse("http://example.com/").unwrap();
        assert_eq!(t.host(), "example.com");
        assert_eq!(t.path(), "/");
    }

    #[test]
    fn explicit_port() {
        let t = Target::parse("localhost:8443/health").unwrap();
        assert_eq!(t.host(), "localhost");
        assert_eq!(t.port(), 8443);
        assert_eq!(t.path(), "/health");
        assert_eq!(t.to_string(), "https://localhost:8443/health");
    }

    #[test]
    fn request_line_is_http_1_0() {
        let t = Target::parse("example.com/a/b").unwrap();
        assert_eq!(
            t.request_line(),
            "GET /a/b HTTP/1.0\r\nHost: example.com\r\n\r\n"
        );
        let t = Target::parse("127.0.0.1:4443").unwrap();
        assert_eq!(
            t.request_line(),
            "GET / HTTP/1.0\r\nHost: 127.0.0.1:4443\r\n\r\n"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Target::parse(""), Err(TargetError::Empty));
        assert_eq!(Target::parse("https:///path"), Err(TargetError::Empty));
        assert_eq!(
            Target::parse("localhost"),
            Err(TargetError::InvalidHost("localhost".into()))
        );
        assert_eq!(
            Target::parse("a"),
            Err(TargetError::InvalidHost("a".into()))
        );
        assert_eq!(
            Target::parse("exa mple.com"),
            Err(TargetError::InvalidHost("exa mple.com".into()))
        );
        assert_eq!(
            Target::parse(".example.com"),
            Err(TargetError::InvalidHost(".example.com".into()))
        );
        assert_eq!(
            Target::parse("example.com:http"),
            Err(TargetError::InvalidPort("http".into()))
        );
        assert_eq!(
            Target::parse("example.com:0"),
            Err(TargetError::InvalidPort("0".into()))
        );
        assert_eq!(
            Target::parse("example.com/a b"),
            Err(TargetError::InvalidPath("/a b".into()))
        );
    }

    #[test]
    fn from_str() {
        let t: Target = "example.org/x".parse().unwrap();
        assert_eq!(t.to_string(), "https://example.org/x");
    }
}
