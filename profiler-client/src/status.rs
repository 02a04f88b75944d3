use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusLineError {
    #[error("empty response")]
    Empty,
    #[error("status line is not ASCII text")]
    NotText,
    #[error("expected an HTTP version, found '{0}'")]
    Protocol(String),
    #[error("status line has no status code: '{0}'")]
    MissingCode(String),
    #[error("invalid status code '{0}'")]
    InvalidCode(String),
}

/// Extract the status code from the first line of a raw response.
///
/// The line runs up to the first line feed (a preceding carriage return is dropped),
/// leading whitespace is ignored, the first token has to be an `HTTP/x.y` version and
/// the second exactly three digits.
pub fn parse_status_code(response: &[u8]) -> Result<StatusCode, StatusLineError> {
    let end = response
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(response.len());
    let line = &response[..end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if !line.is_ascii() {
        return Err(StatusLineError::NotText);
    }
    let line = std::str::from_utf8(line).map_err(|_| StatusLineError::NotText)?;

    let mut tokens = line.split_whitespace();
    let version = tokens.next().ok_or(StatusLineError::Empty)?;
    if !version.starts_with("HTTP/") {
        return Err(StatusLineError::Protocol(version.into()));
    }
    let code = tokens
        .next()
        .ok_or_else(|| StatusLineError::MissingCode(line.trim().into()))?;
    if code.len() != 3 {
        return Err(StatusLineError::InvalidCode(code.into()));
    }
    StatusCode::from_bytes(code.as_bytes()).map_err(|_| StatusLineError::InvalidCode(code.into()))
}
