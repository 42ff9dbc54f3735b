//! Rendering of a core [`Filter`] into parameterised PostgreSQL.
//!
//! Column names come from a fixed mapping and never from user input; every
//! user-supplied value travels as a bind parameter.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;
use tasktracker_core::filter::{Direction, Field, Filter, Predicate, Value};
use tasktracker_core::status::StatusId;
use tasktracker_core::types::{DbId, Priority, Timestamp};

/// Typed bind value for dynamically-built list queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(DbId),
    Int(Priority),
    SmallInt(StatusId),
    Text(String),
    Timestamp(Timestamp),
}

impl From<&Value> for BindValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Id(v) => BindValue::BigInt(*v),
            Value::Int(v) => BindValue::Int(*v),
            Value::Status(v) => BindValue::SmallInt(*v),
            Value::Text(v) => BindValue::Text(v.clone()),
            Value::Timestamp(v) => BindValue::Timestamp(*v),
        }
    }
}

/// A filter rendered to SQL fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    /// Empty when there are no predicates, otherwise starts with `WHERE `.
    pub where_clause: String,
    /// Always starts with `ORDER BY ` and ends with the id tie-breaker.
    pub order_clause: String,
    pub bind_values: Vec<BindValue>,
}

/// Column backing a field. Status fields map to their lookup-id columns.
fn column(field: Field) -> &'static str {
    match field {
        Field::Id => "id",
        Field::Name => "name",
        Field::Priority => "priority",
        Field::Status => "status_id",
        Field::StartDate => "start_date",
        Field::CompleteDate => "complete_date",
        Field::ProjectId => "project_id",
    }
}

pub fn render(filter: &Filter) -> SqlFilter {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();
    let mut bind_idx = 1u32;

    for predicate in filter.predicates() {
        match predicate {
            Predicate::Contains { field, needle } => {
                // strpos keeps the match literal and case-sensitive; LIKE would need escaping.
                conditions.push(format!("strpos({}, ${bind_idx}) > 0", column(*field)));
                bind_values.push(BindValue::Text(needle.clone()));
            }
            Predicate::Equals { field, value } => {
                conditions.push(format!("{} = ${bind_idx}", column(*field)));
                bind_values.push(BindValue::from(value));
            }
        }
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sort = filter.sort();
    let direction = match sort.direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };
    let order_clause = match sort.field {
        Field::Id => format!("ORDER BY id {direction}"),
        // Byte order, matching in-memory string comparison regardless of database collation.
        Field::Name => format!("ORDER BY name COLLATE \"C\" {direction}, id ASC"),
        field => format!("ORDER BY {} {direction}, id ASC", column(field)),
    };

    SqlFilter {
        where_clause,
        order_clause,
        bind_values,
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::SmallInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
