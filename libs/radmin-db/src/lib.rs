//! SeaORM translation layer for the list pipeline: compiles a decoded
//! filter map into a `Condition` set and executes count + paginated fetch.
//! Request parsing belongs to `radmin-core`; HTTP shaping to `radmin-rest`.

pub mod error;
pub mod executor;
pub mod filter;

pub use error::ListQueryError;
pub use executor::fetch_list;
pub use filter::{CustomFilter, ResourceFilters};
