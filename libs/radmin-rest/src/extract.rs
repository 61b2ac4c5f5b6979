use std::convert::Infallible;
use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use radmin_core::RawQuery;

/// Axum extractor capturing the raw query-string pairs for provider
/// resolution. Infallible: an absent query string is just an empty set.
///
/// Usage in handlers:
///   async fn list(RawListQuery(query): RawListQuery, /* ... */) { ... }
#[derive(Debug, Clone)]
pub struct RawListQuery(pub RawQuery);

impl RawListQuery {
    #[inline]
    pub fn into_inner(self) -> RawQuery {
        self.0
    }
}

impl Deref for RawListQuery {
    type Target = RawQuery;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RawListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl core::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let raw = parts.uri.query().unwrap_or_default();
        let query = RawQuery::from_query_str(raw);
        async move { Ok(RawListQuery(query)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    #[tokio::test]
    async fn captures_decoded_pairs_from_the_uri() {
        let (mut parts, _) = Request::builder()
            .uri("/users?range=%5B0%2C9%5D&sort=%5B%22name%22%2C%22ASC%22%5D")
            .body(())
            .unwrap()
            .into_parts();
        let RawListQuery(query) = RawListQuery::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.get("range"), Some("[0,9]"));
        assert_eq!(query.get("sort"), Some(r#"["name","ASC"]"#));
    }

    #[tokio::test]
    async fn missing_query_string_yields_an_empty_set() {
        let (mut parts, _) = Request::builder()
            .uri("/users")
            .body(())
            .unwrap()
            .into_parts();
        let RawListQuery(query) = RawListQuery::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!query.has("range"));
    }
}
