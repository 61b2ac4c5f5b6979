//! Count + fetch execution over a compiled condition set.

use radmin_core::{ListDataRequest, ListDataResult, SortDir};
use sea_orm::sea_query::Expr;
use sea_orm::{
    Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;

use crate::error::ListQueryError;
use crate::filter::ResourceFilters;

/// Run the list pipeline for one resource: compile the filters, count the
/// unpaginated set, then fetch the sorted page and map rows to DTOs.
pub async fn fetch_list<E, D, C, F>(
    conn: &C,
    filters: &ResourceFilters<E>,
    req: &ListDataRequest,
    map: F,
) -> Result<ListDataResult<D>, ListQueryError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: Copy,
    C: ConnectionTrait,
    F: Fn(E::Model) -> D,
{
    let cond = filters.conditions(&req.filter_values)?;

    // Total ignores sorting and pagination by construction.
    let total = count_total::<E, C>(conn, filters, cond.clone()).await?;

    // An inverted range resolves to a non-positive limit: a valid zero-row
    // page, not an error, and not worth a second round-trip.
    if let Some((_, limit)) = req.pagination() {
        if limit <= 0 {
            debug!(limit, total, "non-positive limit, returning empty page");
            return Ok(ListDataResult::empty(total));
        }
    }

    let mut select = E::find().filter(cond);

    if let Some(field) = req.sort_field.as_deref().filter(|f| !f.is_empty()) {
        let col = filters.sort_column(field)?;
        let order = match req.sort_dir() {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        select = select.order_by(col, order);
    }

    if let Some((offset, limit)) = req.pagination() {
        select = select.offset(offset as u64).limit(limit as u64);
    }

    let rows = select.all(conn).await?;
    Ok(ListDataResult::new(
        rows.into_iter().map(map).collect(),
        total,
    ))
}

/// COUNT over the configured count column (the primary key by default),
/// falling back to a row count when the entity exposes no key column.
async fn count_total<E, C>(
    conn: &C,
    filters: &ResourceFilters<E>,
    cond: Condition,
) -> Result<u64, ListQueryError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: Copy,
    C: ConnectionTrait,
{
    match filters.count_col() {
        Some(col) => {
            let total: Option<i64> = E::find()
                .filter(cond)
                .select_only()
                .expr_as(Expr::col(col).count(), "total")
                .into_tuple()
                .one(conn)
                .await?;
            Ok(total.unwrap_or(0).max(0) as u64)
        }
        None => Ok(E::find().filter(cond).count(conn).await?),
    }
}
