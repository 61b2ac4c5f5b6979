//! Executor behavior against a mocked store.

use std::collections::BTreeMap;

use radmin_core::{ListDataRequest, ProviderRegistry, RawQuery};
use radmin_db::{fetch_list, ListQueryError, ResourceFilters};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value as Json};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, PartialEq)]
struct UserDto {
    id: i64,
    name: String,
}

impl From<Model> for UserDto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

fn filters() -> ResourceFilters<Entity> {
    ResourceFilters::new()
        .field("id", Column::Id)
        .field("name", Column::Name)
        .search_field(Column::Name)
        .search_field(Column::Email)
}

fn count_row(total: i64) -> BTreeMap<&'static str, sea_orm::Value> {
    BTreeMap::from([("total", sea_orm::Value::BigInt(Some(total)))])
}

fn user(id: i64, name: &str) -> Model {
    Model {
        id,
        name: name.to_string(),
        email: format!("{name}@example.com"),
    }
}

fn request(pairs: &[(&str, &str)]) -> ListDataRequest {
    let query: RawQuery = pairs.iter().copied().collect();
    ProviderRegistry::with_builtin_providers()
        .resolve(&query)
        .expect("query matches a provider")
        .request
}

#[tokio::test]
async fn returns_mapped_page_and_unpaginated_total() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(25)]])
        .append_query_results([vec![user(1, "Ada"), user(2, "Brian")]])
        .into_connection();

    let req = request(&[("range", "[0,1]"), ("sort", r#"["name","ASC"]"#)]);
    let page = fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(
        page.data,
        vec![
            UserDto {
                id: 1,
                name: "Ada".into()
            },
            UserDto {
                id: 2,
                name: "Brian".into()
            }
        ]
    );

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 2, "count then fetch");
    let fetch_sql = format!("{:?}", log[1]);
    assert!(fetch_sql.contains("ORDER BY"), "{fetch_sql}");
    assert!(fetch_sql.contains("LIMIT"), "{fetch_sql}");
}

#[tokio::test]
async fn non_positive_limit_short_circuits_after_the_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(25)]])
        .into_connection();

    // range=[5,2] → offset 5, limit -2
    let req = request(&[("range", "[5,2]"), ("sort", r#"["id","ASC"]"#)]);
    let page = fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.total, 25);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1, "only the count query may run");
}

#[tokio::test]
async fn sort_is_omitted_without_a_sort_field() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(1)]])
        .append_query_results([vec![user(1, "Ada")]])
        .into_connection();

    let req = request(&[("page", "1"), ("per_page", "10")]);
    fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap();

    let log = db.into_transaction_log();
    let fetch_sql = format!("{:?}", log[1]);
    assert!(!fetch_sql.contains("ORDER BY"), "{fetch_sql}");
}

#[tokio::test]
async fn unknown_sort_field_is_a_client_error_not_a_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(3)]])
        .into_connection();

    let req = request(&[
        ("page", "1"),
        ("per_page", "10"),
        ("sort_field", "secrets"),
    ]);
    let err = fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap_err();
    assert!(matches!(err, ListQueryError::UnknownSortField(f) if f == "secrets"));
}

#[tokio::test]
async fn filter_values_flow_into_both_count_and_fetch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(2)]])
        .append_query_results([vec![user(7, "Smith"), user(9, "Smiley")]])
        .into_connection();

    let mut req = request(&[("range", "[0,9]"), ("sort", r#"["name","ASC"]"#)]);
    req.filter_values = match json!({"name": "smi"}) {
        Json::Object(map) => map,
        _ => unreachable!(),
    };

    let page = fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let log = db.into_transaction_log();
    for entry in &log {
        let sql = format!("{entry:?}");
        assert!(sql.contains("LIKE"), "{sql}");
    }
}

#[tokio::test]
async fn store_failures_propagate_unchanged() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([sea_orm::DbErr::Custom("connection reset".into())])
        .into_connection();

    let req = request(&[("page", "1"), ("per_page", "10")]);
    let err = fetch_list(&db, &filters(), &req, UserDto::from)
        .await
        .unwrap_err();
    assert!(matches!(err, ListQueryError::Query(_)), "{err}");
}
