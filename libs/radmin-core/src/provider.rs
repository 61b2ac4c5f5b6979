use serde_json::{Map, Value};

use crate::request::{ListDataRequest, RawQuery};

/// Closed set of supported client dialects. The response body shape
/// depends on which one matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// ra-data-simple-rest: `range=[0,24]&sort=["name","ASC"]&filter={...}`
    Rest,
    /// Scalar paging: `page=2&per_page=10&sort_field=name&sort_order=DESC`
    Paged,
}

/// Strategy for one client-side query encoding.
///
/// Implementations are stateless pure functions of the raw query.
/// Detection is by presence (and shape) of the dialect's parameters, so a
/// client never has to declare which frontend library it is.
pub trait ListRequestProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Higher priorities are consulted first.
    fn priority(&self) -> i32;

    fn dialect(&self) -> Dialect;

    fn supports(&self, query: &RawQuery) -> bool;

    fn parse(&self, query: &RawQuery) -> ListDataRequest;
}

/// Lenient filter decoding: a JSON object becomes the filter map, anything
/// else (including malformed JSON) becomes an empty map. Garbled client
/// state must not break listing.
fn decode_filter(raw: Option<&str>) -> (Option<String>, Map<String, Value>) {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return (None, Map::new());
    };
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    (Some(raw.to_string()), values)
}

/// A JSON-encoded two-element array, or nothing.
fn decode_two(raw: &str) -> Option<(Value, Value)> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) if items.len() == 2 => {
            let mut items = items.into_iter();
            Some((items.next()?, items.next()?))
        }
        _ => None,
    }
}

fn int_param(query: &RawQuery, key: &str) -> Option<i64> {
    query.get(key).and_then(|v| v.parse::<i64>().ok())
}

/// `range`/`sort` JSON-array dialect spoken by ra-data-simple-rest.
pub struct RestProvider;

impl ListRequestProvider for RestProvider {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn dialect(&self) -> Dialect {
        Dialect::Rest
    }

    fn supports(&self, query: &RawQuery) -> bool {
        query.get("range").is_some_and(|r| decode_two(r).is_some())
            && query.get("sort").is_some_and(|s| decode_two(s).is_some())
    }

    fn parse(&self, query: &RawQuery) -> ListDataRequest {
        let mut offset = None;
        let mut limit = None;
        if let Some((start, end)) = query.get("range").and_then(decode_two) {
            if let (Some(start), Some(end)) = (start.as_i64(), end.as_i64()) {
                // Inclusive bounds. An inverted range yields a non-positive
                // limit the executor resolves to an empty page.
                offset = Some(start);
                limit = Some(end - start + 1);
            }
        }

        let mut sort_field = None;
        let mut sort_order = None;
        if let Some((field, order)) = query.get("sort").and_then(decode_two) {
            if let (Some(field), Some(order)) = (field.as_str(), order.as_str()) {
                sort_field = Some(field.to_string());
                // Pass-through, uppercased. Direction validation is the
                // executor's job.
                sort_order = Some(order.to_uppercase());
            }
        }

        let (filter, filter_values) = decode_filter(query.get("filter"));

        ListDataRequest {
            limit,
            offset,
            sort_field,
            sort_order,
            filter,
            filter_values,
        }
    }
}

/// `page`/`per_page`/`sort_field`/`sort_order` scalar dialect.
pub struct PagedProvider;

impl ListRequestProvider for PagedProvider {
    fn name(&self) -> &'static str {
        "paged"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn dialect(&self) -> Dialect {
        Dialect::Paged
    }

    fn supports(&self, query: &RawQuery) -> bool {
        ["page", "per_page", "sort_field", "sort_order"]
            .iter()
            .any(|key| query.has(key))
    }

    fn parse(&self, query: &RawQuery) -> ListDataRequest {
        // Both clamp to 1 so non-positive pagination never reaches the
        // store. Asking for a page size alone implies page 1.
        let per_page = int_param(query, "per_page").map(|p| p.max(1));
        let page = int_param(query, "page")
            .map(|p| p.max(1))
            .or(per_page.map(|_| 1));

        let offset = match (page, per_page) {
            (Some(page), Some(per_page)) => Some((page - 1) * per_page),
            _ => None,
        };

        let sort_field = query.get("sort_field").map(str::to_string);
        let sort_order = query.get("sort_order").map(|o| o.to_uppercase());

        let (filter, filter_values) = decode_filter(query.get("filter"));

        ListDataRequest {
            limit: per_page,
            offset,
            sort_field,
            sort_order,
            filter,
            filter_values,
        }
    }
}
