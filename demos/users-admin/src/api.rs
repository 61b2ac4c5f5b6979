use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use radmin_core::ProviderRegistry;
use radmin_db::{fetch_list, ListQueryError, ResourceFilters};
use radmin_rest::{
    bad_request, internal_error, resolve_error_to_problem, ListResponse, ProblemResponse,
    RawListQuery,
};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::dto::UserDto;
use crate::entity::{Column, Entity};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub registry: Arc<ProviderRegistry>,
    pub filters: Arc<ResourceFilters<Entity>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            registry: Arc::new(ProviderRegistry::with_builtin_providers()),
            filters: Arc::new(user_filters()),
        }
    }
}

/// Wire-name → column map for the users resource, plus the `q` search
/// fields, the `teamId` association alias and the `active` filter hook.
pub fn user_filters() -> ResourceFilters<Entity> {
    ResourceFilters::new()
        .field("id", Column::Id)
        .field("name", Column::Name)
        .field("email", Column::Email)
        .field("createdAt", Column::CreatedAt)
        .association("teamId", Column::TeamId)
        .custom("active", |value: &Value| {
            let active = match value {
                Value::Bool(b) => *b,
                Value::String(s) => s == "true",
                _ => true,
            };
            if active {
                Condition::all().add(Column::DeletedAt.is_null())
            } else {
                Condition::all().add(Column::DeletedAt.is_not_null())
            }
        })
        .search_field(Column::Name)
        .search_field(Column::Email)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_users(
    State(state): State<AppState>,
    RawListQuery(query): RawListQuery,
) -> Result<ListResponse<UserDto>, ProblemResponse> {
    let resolved = state
        .registry
        .resolve(&query)
        .map_err(|e| resolve_error_to_problem(&e))?;

    info!(provider = resolved.provider, "listing users");

    let page = fetch_list(&state.db, &state.filters, &resolved.request, UserDto::from)
        .await
        .map_err(|e| map_query_error(&e))?;

    Ok(ListResponse::new(resolved.dialect, &resolved.request, page))
}

fn map_query_error(err: &ListQueryError) -> ProblemResponse {
    match err {
        ListQueryError::UnknownFilterField(_)
        | ListQueryError::UnknownSortField(_)
        | ListQueryError::UnsupportedValue(_) => bad_request(err.to_string()),
        ListQueryError::Query(db_err) => {
            error!(error = %db_err, "users list query failed");
            internal_error("users list query failed")
        }
    }
}
