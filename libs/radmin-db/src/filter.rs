//! Filter-map → `sea_orm::Condition` compiler.
//!
//! Parsing belongs to the request providers; this module only consumes the
//! decoded filter map from a `ListDataRequest`.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, Iterable, PrimaryKeyToColumn};
use serde_json::{Map, Value};

use crate::error::ListQueryError;

/// Custom predicate hook: receives the raw filter value and contributes a
/// complete condition for its field, bypassing every other interpretation.
pub type CustomFilter = Arc<dyn Fn(&Value) -> Condition + Send + Sync>;

/// Per-resource filter/sort configuration: which wire names map to which
/// columns, association aliases, custom hooks and the full-text field list.
///
/// Built once at startup, immutable during request handling.
pub struct ResourceFilters<E: EntityTrait> {
    columns: HashMap<String, E::Column>,
    associations: HashMap<String, E::Column>,
    custom: HashMap<String, CustomFilter>,
    search_fields: Vec<E::Column>,
    count_column: Option<E::Column>,
}

impl<E: EntityTrait> Default for ResourceFilters<E>
where
    E::Column: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> ResourceFilters<E>
where
    E::Column: Copy,
{
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            associations: HashMap::new(),
            custom: HashMap::new(),
            search_fields: Vec::new(),
            count_column: None,
        }
    }

    /// Plain filterable/sortable column under its wire name.
    pub fn field(mut self, name: impl Into<String>, col: E::Column) -> Self {
        self.columns.insert(name.into(), col);
        self
    }

    /// Association alias: equality (or IN, for a multi-element array)
    /// against the association's identity column, e.g. `teamId` → the team
    /// foreign key.
    pub fn association(mut self, name: impl Into<String>, col: E::Column) -> Self {
        self.associations.insert(name.into(), col);
        self
    }

    /// Custom hook for filters that are not simple comparisons.
    pub fn custom(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Value) -> Condition + Send + Sync + 'static,
    ) -> Self {
        self.custom.insert(name.into(), Arc::new(f));
        self
    }

    /// Column searched by the reserved `q` filter.
    pub fn search_field(mut self, col: E::Column) -> Self {
        self.search_fields.push(col);
        self
    }

    /// COUNT target; the entity primary key when not set.
    pub fn count_column(mut self, col: E::Column) -> Self {
        self.count_column = Some(col);
        self
    }

    pub(crate) fn count_col(&self) -> Option<E::Column> {
        self.count_column
            .or_else(|| E::PrimaryKey::iter().next().map(|pk| pk.into_column()))
    }

    pub(crate) fn sort_column(&self, field: &str) -> Result<E::Column, ListQueryError> {
        self.columns
            .get(field)
            .copied()
            .ok_or_else(|| ListQueryError::UnknownSortField(field.to_string()))
    }

    fn column(&self, field: &str) -> Result<E::Column, ListQueryError> {
        self.columns
            .get(field)
            .copied()
            .ok_or_else(|| ListQueryError::UnknownFilterField(field.to_string()))
    }

    /// Compile the decoded filter map into one AND-joined condition set.
    ///
    /// Per-field interpretation, first match wins: custom hook,
    /// association alias, reserved `q` full-text, array membership, scalar
    /// equality/substring.
    pub fn conditions(
        &self,
        filter_values: &Map<String, Value>,
    ) -> Result<Condition, ListQueryError> {
        let mut all = Condition::all();

        for (field, value) in filter_values {
            // Null and empty-string values mean "no filter", not "match
            // empty", for every field.
            if is_blank(value) {
                continue;
            }

            if let Some(custom) = self.custom.get(field) {
                all = all.add(custom(value));
                continue;
            }

            if let Some(col) = self.associations.get(field) {
                all = all.add(membership(field, *col, value)?);
                continue;
            }

            if field == "q" {
                if let Some(cond) = self.full_text(value) {
                    all = all.add(cond);
                }
                continue;
            }

            if value.is_array() {
                let col = self.column(field)?;
                all = all.add(membership(field, col, value)?);
                continue;
            }

            let col = self.column(field)?;
            all = all.add(scalar_predicate(field, col, value)?);
        }

        Ok(all)
    }

    /// OR-group of substring matches over the configured search fields.
    /// Skipped entirely when the list is empty or the needle unusable.
    fn full_text(&self, value: &Value) -> Option<Condition> {
        let needle = match value {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if self.search_fields.is_empty() {
            return None;
        }
        let mut any = Condition::any();
        for col in &self.search_fields {
            any = any.add(col.like(like_contains(&needle)));
        }
        Some(any)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Identifier-looking fields compare exactly; other strings get a
/// substring match. A heuristic, not a guarantee: override with an
/// association alias or a custom hook where it misfires.
fn is_identifier_field(field: &str) -> bool {
    field == "id" || field.ends_with("Id")
}

fn to_db_value(field: &str, value: &Value) -> Result<sea_orm::Value, ListQueryError> {
    match value {
        Value::String(s) => Ok(s.clone().into()),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(ListQueryError::UnsupportedValue(field.to_string()))
            }
        }
        _ => Err(ListQueryError::UnsupportedValue(field.to_string())),
    }
}

/// Equality for scalars and single-element arrays, IN for the rest.
/// One membership predicate, never per-element conditions OR'd together.
fn membership<C: ColumnTrait>(
    field: &str,
    col: C,
    value: &Value,
) -> Result<Condition, ListQueryError> {
    match value {
        Value::Array(items) => match items.as_slice() {
            // IN () matches nothing
            [] => Ok(Condition::all().add(Expr::cust("1 = 0"))),
            [single] => Ok(Condition::all().add(col.eq(to_db_value(field, single)?))),
            many => {
                let values = many
                    .iter()
                    .map(|v| to_db_value(field, v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Condition::all().add(col.is_in(values)))
            }
        },
        other => Ok(Condition::all().add(col.eq(to_db_value(field, other)?))),
    }
}

fn scalar_predicate<C: ColumnTrait>(
    field: &str,
    col: C,
    value: &Value,
) -> Result<Condition, ListQueryError> {
    Ok(match value {
        Value::String(s) if !is_identifier_field(field) => {
            Condition::all().add(col.like(like_contains(s)))
        }
        other => Condition::all().add(col.eq(to_db_value(field, other)?)),
    })
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
