use thiserror::Error;

/// Error type for object graph queries and the stores they run against.
///
/// Unsatisfiable queries, missing anchors and cycles are not errors; they
/// resolve to empty results.
#[derive(Debug, Error)]
pub enum ObjectGraphError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ObjectGraphError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        ObjectGraphError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        ObjectGraphError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        ObjectGraphError::QueryError(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ObjectGraphError::InvalidInput(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        ObjectGraphError::Configuration(msg.into())
    }
}
