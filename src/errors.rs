use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Config file missing, unreadable, or not valid JSON
    ConfigError(String),
    /// Network request failed
    NetworkError(String),
    /// Remote answered with a non-200 status
    UnexpectedResponse { url: String, status: u16 },
    /// Response body is not the JSON shape we expect
    MalformedPayload(String),
    /// A required response header is absent
    MissingHeader(&'static str),
    /// Zone filename does not match the CZDS naming scheme
    MalformedFilename(String),
    /// Portal still shows the anonymous login link after submitting credentials
    LoginFailed,
    /// Dashboard requests table missing from the page
    TableNotFound,
    /// Request history table missing from the detail page
    HistoryTableNotFound,
    /// Failed to parse a date, id, or other scraped value
    ParseError(String),
    /// Invalid URL format
    UrlError(String),
    /// Invalid input format
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Config error: {msg}"),
            AppError::NetworkError(msg) => write!(f, "Network error: {msg}"),
            AppError::UnexpectedResponse { url, status } => {
                write!(
                    f,
                    "Unexpected response from CZDS while fetching '{url}' (HTTP {status})"
                )
            }
            AppError::MalformedPayload(msg) => {
                write!(f, "Unable to parse JSON returned from CZDS: {msg}")
            }
            AppError::MissingHeader(name) => {
                write!(f, "Missing required '{name}' header in HTTP call response")
            }
            AppError::MalformedFilename(name) => {
                write!(
                    f,
                    "Filename '{name}' does not match the zone data naming scheme"
                )
            }
            AppError::LoginFailed => write!(f, "Login failed!"),
            AppError::TableNotFound => write!(f, "Request table not found!"),
            AppError::HistoryTableNotFound => write!(f, "History table not found!"),
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::UrlError(msg) => write!(f, "Invalid URL: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::ParseError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
