//! Transport-agnostic list-query model.
//!
//! A `ListRequestProvider` recognizes one client-side query encoding and
//! normalizes it into a [`ListDataRequest`]; the [`ProviderRegistry`] picks
//! the right provider per request. Storage translation lives in
//! `radmin-db`, HTTP shaping in `radmin-rest`.

pub mod error;
pub mod provider;
pub mod registry;
pub mod request;
pub mod result;

pub use error::ResolveError;
pub use provider::{Dialect, ListRequestProvider, PagedProvider, RestProvider};
pub use registry::{ProviderRegistry, ResolvedListRequest};
pub use request::{ListDataRequest, RawQuery, SortDir};
pub use result::ListDataResult;
