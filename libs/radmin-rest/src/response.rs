use axum::http::header::{HeaderName, HeaderValue, ACCESS_CONTROL_EXPOSE_HEADERS, CONTENT_RANGE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use radmin_core::{Dialect, ListDataRequest, ListDataResult};
use serde::Serialize;

/// Fallback page size when a dialect did not pin a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

const X_CONTENT_RANGE: &str = "x-content-range";

/// Wire shaping for one list result: dialect-specific body plus the range
/// headers both dialects advertise.
///
/// - Rest dialect: bare JSON array, totals ride on the headers only.
/// - Paged dialect: `{"data": [...], "total": N}` wrapper, headers kept
///   for range-style clients pointed at the wrong endpoint.
pub struct ListResponse<T> {
    dialect: Dialect,
    offset: i64,
    limit: i64,
    result: ListDataResult<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(dialect: Dialect, req: &ListDataRequest, result: ListDataResult<T>) -> Self {
        Self {
            dialect,
            offset: req.offset.unwrap_or(0).max(0),
            limit: req.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            result,
        }
    }

    /// `items {start}-{end}/{total}`. A zero total collapses to the
    /// degenerate `items 0-0/0` so the end index can never go negative.
    fn content_range(&self) -> String {
        let total = self.result.total as i64;
        if total == 0 {
            return "items 0-0/0".to_string();
        }
        let end = (self.offset + self.limit - 1).min(total - 1);
        format!("items {}-{}/{}", self.offset, end, total)
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        let content_range = self.content_range();
        let total = self.result.total;

        let mut resp = match self.dialect {
            Dialect::Rest => Json(self.result.data).into_response(),
            Dialect::Paged => Json(self.result).into_response(),
        };

        let headers = resp.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&content_range) {
            headers.insert(CONTENT_RANGE, value);
        }
        if let Ok(value) = HeaderValue::from_str(&total.to_string()) {
            headers.insert(HeaderName::from_static(X_CONTENT_RANGE), value);
        }
        // Without this, browser-side consumers cannot read the range
        // headers across origins.
        headers.insert(
            ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("Content-Range, X-Content-Range"),
        );
        resp
    }
}
