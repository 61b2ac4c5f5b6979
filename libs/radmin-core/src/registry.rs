use std::sync::Arc;

use crate::error::ResolveError;
use crate::provider::{Dialect, ListRequestProvider, PagedProvider, RestProvider};
use crate::request::{ListDataRequest, RawQuery};

/// A parsed request plus the dialect that produced it, so the response
/// formatter can round-trip the wire shape.
#[derive(Clone, Debug)]
pub struct ResolvedListRequest {
    pub provider: &'static str,
    pub dialect: Dialect,
    pub request: ListDataRequest,
}

/// Ordered set of request providers.
///
/// Built during startup wiring and read-only afterwards; share it as
/// `Arc<ProviderRegistry>` across request handlers.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ListRequestProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard registry: REST range/sort first, scalar paging fallback.
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(RestProvider));
        registry.register(Arc::new(PagedProvider));
        registry
    }

    /// Append a provider and re-sort by descending priority. The sort is
    /// stable: equal priorities keep registration order.
    pub fn register(&mut self, provider: Arc<dyn ListRequestProvider>) {
        self.providers.push(provider);
        self.providers
            .sort_by_key(|p| std::cmp::Reverse(p.priority()));
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Pick the first provider that recognizes the query.
    ///
    /// No match means the client speaks an unsupported dialect or a
    /// registration is missing from the wiring; neither is something to
    /// paper over with a default.
    pub fn resolve(&self, query: &RawQuery) -> Result<ResolvedListRequest, ResolveError> {
        for provider in &self.providers {
            if provider.supports(query) {
                return Ok(ResolvedListRequest {
                    provider: provider.name(),
                    dialect: provider.dialect(),
                    request: provider.parse(query),
                });
            }
        }
        Err(ResolveError::NoProviderMatched {
            registered: self.provider_names().join(", "),
        })
    }
}
