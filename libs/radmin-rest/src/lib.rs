//! Axum surface for the list pipeline: raw-query extraction, range-header
//! response shaping and RFC 9457 problem payloads.

pub mod error;
pub mod extract;
pub mod problem;
pub mod response;

pub use error::resolve_error_to_problem;
pub use extract::RawListQuery;
pub use problem::{bad_request, internal_error, not_found, Problem, ProblemResponse};
pub use response::{ListResponse, DEFAULT_PAGE_SIZE};
