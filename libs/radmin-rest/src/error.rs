use radmin_core::ResolveError;
use tracing::warn;

use crate::problem::{bad_request, ProblemResponse};

/// Unsupported dialect or missing registration. The request carried no
/// recognizable list parameters, so the client gets a 400 naming the
/// dialects this deployment understands.
pub fn resolve_error_to_problem(err: &ResolveError) -> ProblemResponse {
    warn!(error = %err, "list request resolution failed");
    bad_request(err.to_string())
}
