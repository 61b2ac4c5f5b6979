use serde::{Deserialize, Serialize};

/// One page of DTOs plus the unpaginated match count.
#[cfg_attr(feature = "with-utoipa", derive(utoipa::ToSchema))]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ListDataResult<T> {
    /// Page of results, in store order (post-sort, post-pagination).
    pub data: Vec<T>,
    /// Count of all rows matching the filter, ignoring pagination.
    pub total: u64,
}

impl<T> ListDataResult<T> {
    pub fn new(data: Vec<T>, total: u64) -> Self {
        Self { data, total }
    }

    /// Zero-row page; `total` still reflects the filtered count.
    pub fn empty(total: u64) -> Self {
        Self {
            data: Vec::new(),
            total,
        }
    }

    /// Map items while preserving the total (entity -> DTO convenience).
    pub fn map_items<U>(self, mut f: impl FnMut(T) -> U) -> ListDataResult<U> {
        ListDataResult {
            data: self.data.into_iter().map(&mut f).collect(),
            total: self.total,
        }
    }
}
