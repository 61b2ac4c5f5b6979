use serde_json::{Map, Value};

/// Sort direction resolved from the raw order token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Normalized, read-only list query produced by a request provider.
///
/// Downstream hooks never mutate an instance; "modifying" a request means
/// cloning into a new value with replaced fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListDataRequest {
    /// Max rows to return. May be non-positive when derived from an
    /// inverted `range=[s,e]`; the executor resolves that to an empty page.
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
    /// Logical field name; validated against the per-resource column map
    /// by the executor, not here.
    pub sort_field: Option<String>,
    /// Raw uppercased order token exactly as the client sent it.
    /// Resolution happens in [`ListDataRequest::sort_dir`].
    pub sort_order: Option<String>,
    /// Original filter payload, kept for logging only.
    pub filter: Option<String>,
    /// Authoritative decoded filter set. Always a fully-decoded structure,
    /// never a JSON string. Blank values are preserved here and dropped
    /// during predicate building.
    pub filter_values: Map<String, Value>,
}

impl ListDataRequest {
    /// DESC only on the exact token `"DESC"`; anything else sorts ascending.
    pub fn sort_dir(&self) -> SortDir {
        match self.sort_order.as_deref() {
            Some("DESC") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    /// Pagination applies only when the client pinned both bounds.
    /// The offset is clamped at zero; the limit is returned as-is.
    pub fn pagination(&self) -> Option<(i64, i64)> {
        match (self.offset, self.limit) {
            (Some(offset), Some(limit)) => Some((offset.max(0), limit)),
            _ => None,
        }
    }
}

/// Decoded query-string pairs in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RawQuery {
    pairs: Vec<(String, String)>,
}

impl RawQuery {
    pub fn from_query_str(raw: &str) -> Self {
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// First occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
