use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity;

/// Wire-facing projection of a user row. Mapped field by field on purpose:
/// the wire schema must not drift silently with the table.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub team_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::Model> for UserDto {
    fn from(m: entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            team_id: m.team_id,
            created_at: m.created_at,
        }
    }
}
