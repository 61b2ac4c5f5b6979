use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListQueryError {
    /// Storage-layer failure during count or fetch; propagated unchanged.
    /// HTTP status mapping is the caller's responsibility.
    #[error("list query failed: {0}")]
    Query(#[from] sea_orm::DbErr),

    #[error("unknown filter field: {0}")]
    UnknownFilterField(String),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("unsupported filter value for field: {0}")]
    UnsupportedValue(String),
}
