use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The query matched none of the registered dialects: either the
    /// client speaks an unsupported encoding or a provider registration is
    /// missing from the wiring.
    #[error("no list request provider matched the query; registered providers: {registered}")]
    NoProviderMatched { registered: String },
}
