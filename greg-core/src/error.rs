//! Error types for greg operations

#[derive(Debug, thiserror::Error)]
pub enum GregError {
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Unsupported git hosting provider: {0}")]
    UnsupportedHost(String),

    #[error("Search term must be specified; wrap multiple words in quotes")]
    MissingPattern,

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Query failed with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Response missing {0}")]
    MissingData(&'static str),

    #[error("Fetcher already started")]
    AlreadyStarted,

    #[error("Fetcher already stopped; construct a new one per search")]
    AlreadyStopped,

    #[error("Pending directory queue full ({capacity} entries) while expanding {path}")]
    WorkQueueFull { capacity: usize, path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_joins_messages() {
        let err = GregError::GraphQl(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GregError = io.into();
        assert!(matches!(err, GregError::Io(_)));
    }
}
