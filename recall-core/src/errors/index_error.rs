/// Vector index adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The collection does not exist or holds no records. Recoverable:
    /// the retrieval service reports zero hits.
    #[error("collection unavailable: {collection}")]
    Unavailable { collection: String },

    /// The search call itself failed (connectivity, rejected filter, bad status).
    #[error("{backend} call failed: {reason}")]
    BackendCall { backend: String, reason: String },

    #[error("malformed payload for point {point}: {reason}")]
    MalformedPayload { point: String, reason: String },

    #[error("dimension mismatch in {collection}: expected {expected}, got {actual}")]
    DimensionMismatch {
        collection: String,
        expected: usize,
        actual: usize,
    },

    #[error("sqlite error: {message}")]
    StorageError { message: String },

    #[error("invalid search argument: {reason}")]
    InvalidArgument { reason: String },
}
