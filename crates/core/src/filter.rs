//! Backend-agnostic query composition for list endpoints.
//!
//! [`ProjectQuery`] and [`TaskQuery`] hold the optional query-string
//! parameters of a list request. Calling `to_filter()` composes them into a
//! [`Filter`]: a conjunction of [`Predicate`]s plus a [`Sort`]. Storage
//! backends consume the filter either by evaluating it against rows
//! ([`Filter::apply`], via [`Filterable`]) or by rendering it to SQL.

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer};

use crate::sorting::{ProjectSortOrder, TaskSortOrder};
use crate::status::{ProjectStatus, StatusId, TaskStatus};
use crate::types::{DbId, Priority, Timestamp};

// ---------------------------------------------------------------------------
// Filter primitives
// ---------------------------------------------------------------------------

/// A filterable or sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Priority,
    Status,
    StartDate,
    CompleteDate,
    ProjectId,
}

/// A typed comparison value.
///
/// Values of the same field always share a variant, so the derived ordering
/// is the natural ordering of the wrapped type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Id(DbId),
    Int(Priority),
    Status(StatusId),
    Text(String),
    Timestamp(Timestamp),
}

impl From<DbId> for Value {
    fn from(value: DbId) -> Self {
        Value::Id(value)
    }
}

impl From<Priority> for Value {
    fn from(value: Priority) -> Self {
        Value::Int(value)
    }
}

impl From<ProjectStatus> for Value {
    fn from(value: ProjectStatus) -> Self {
        Value::Status(value.id())
    }
}

impl From<TaskStatus> for Value {
    fn from(value: TaskStatus) -> Self {
        Value::Status(value.id())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Timestamp(value)
    }
}

/// A single condition on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive substring match on a text field.
    Contains { field: Field, needle: String },
    /// Exact equality.
    Equals { field: Field, value: Value },
}

impl Predicate {
    /// Evaluate the predicate against a row. Fields the row does not carry never match.
    pub fn matches<R: Filterable + ?Sized>(&self, row: &R) -> bool {
        match self {
            Predicate::Contains { field, needle } => match row.value(*field) {
                Some(Value::Text(text)) => text.contains(needle.as_str()),
                _ => false,
            },
            Predicate::Equals { field, value } => row.value(*field).as_ref() == Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering of a result set. Ties are always broken by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: Field,
    pub direction: Direction,
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            field: Field::Id,
            direction: Direction::Asc,
        }
    }
}

/// Rows that can be evaluated against a [`Filter`] in memory.
pub trait Filterable {
    fn id(&self) -> DbId;

    /// The row's value for `field`, or `None` if the row has no such column.
    fn value(&self, field: Field) -> Option<Value>;
}

/// A composed list query: every predicate must match, results ordered by `sort`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
    sort: Sort,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, field: Field, needle: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Contains {
            field,
            needle: needle.into(),
        });
        self
    }

    pub fn equals(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Equals {
            field,
            value: value.into(),
        });
        self
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn matches<R: Filterable + ?Sized>(&self, row: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }

    /// Compare two rows by the sort field, then by id.
    pub fn compare<R: Filterable + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let by_field = a.value(self.sort.field).cmp(&b.value(self.sort.field));
        let by_field = match self.sort.direction {
            Direction::Asc => by_field,
            Direction::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id().cmp(&b.id()))
    }

    /// Select the matching rows and return them in sort order.
    pub fn apply<'a, R, I>(&self, rows: I) -> Vec<R>
    where
        R: Filterable + Clone + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut selected: Vec<R> = rows
            .into_iter()
            .filter(|row| self.matches(*row))
            .cloned()
            .collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}

// ---------------------------------------------------------------------------
// List query parameters
// ---------------------------------------------------------------------------

/// Filter and sort parameters for `GET /projects`.
///
/// Accepts snake_case names as well as the camelCase spellings
/// (`filterName`, `sortBy`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(default, alias = "filterName")]
    pub filter_name: Option<String>,
    #[serde(default, alias = "filterPriority", deserialize_with = "blank_as_none")]
    pub filter_priority: Option<Priority>,
    #[serde(default, alias = "filterStatus", deserialize_with = "blank_as_none_variant")]
    pub filter_status: Option<ProjectStatus>,
    #[serde(default, alias = "filterStartDate", deserialize_with = "blank_as_none")]
    pub filter_start_date: Option<Timestamp>,
    #[serde(default, alias = "filterEndDate", deserialize_with = "blank_as_none")]
    pub filter_end_date: Option<Timestamp>,
    #[serde(default, alias = "sortBy", deserialize_with = "blank_as_none_variant")]
    pub sort_by: Option<ProjectSortOrder>,
}

impl ProjectQuery {
    /// Compose the filter. Blank names and non-positive priorities are ignored.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(name) = non_blank(self.filter_name.as_deref()) {
            filter = filter.contains(Field::Name, name);
        }
        if let Some(priority) = self.filter_priority.filter(|p| *p > 0) {
            filter = filter.equals(Field::Priority, priority);
        }
        if let Some(status) = self.filter_status {
            filter = filter.equals(Field::Status, status);
        }
        if let Some(start) = self.filter_start_date {
            filter = filter.equals(Field::StartDate, start);
        }
        if let Some(end) = self.filter_end_date {
            filter = filter.equals(Field::CompleteDate, end);
        }

        match self.sort_by {
            Some(order) => filter.sorted_by(order.sort()),
            None => filter,
        }
    }
}

/// Filter and sort parameters for `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQuery {
    #[serde(default, alias = "filterName")]
    pub filter_name: Option<String>,
    #[serde(default, alias = "filterPriority", deserialize_with = "blank_as_none")]
    pub filter_priority: Option<Priority>,
    #[serde(default, alias = "filterStatus", deserialize_with = "blank_as_none_variant")]
    pub filter_status: Option<TaskStatus>,
    #[serde(default, alias = "filterProject", deserialize_with = "blank_as_none")]
    pub filter_project: Option<DbId>,
    #[serde(default, alias = "sortBy", deserialize_with = "blank_as_none_variant")]
    pub sort_by: Option<TaskSortOrder>,
}

impl TaskQuery {
    /// Compose the filter. Blank names and non-positive priorities or project ids are ignored.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(name) = non_blank(self.filter_name.as_deref()) {
            filter = filter.contains(Field::Name, name);
        }
        if let Some(priority) = self.filter_priority.filter(|p| *p > 0) {
            filter = filter.equals(Field::Priority, priority);
        }
        if let Some(status) = self.filter_status {
            filter = filter.equals(Field::Status, status);
        }
        if let Some(project_id) = self.filter_project.filter(|id| *id > 0) {
            filter = filter.equals(Field::ProjectId, project_id);
        }

        match self.sort_by {
            Some(order) => filter.sorted_by(order.sort()),
            None => filter,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a query value, treating an empty or blank value as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Like [`blank_as_none`], for enum variants named by their string form.
fn blank_as_none_variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            let raw: String = raw.trim().to_string();
            T::deserialize(IntoDeserializer::<D::Error>::into_deserializer(raw)).map(Some)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: DbId,
        name: &'static str,
        priority: Priority,
    }

    impl Filterable for Row {
        fn id(&self) -> DbId {
            self.id
        }

        fn value(&self, field: Field) -> Option<Value> {
            match field {
                Field::Id => Some(Value::Id(self.id)),
                Field::Name => Some(Value::from(self.name)),
                Field::Priority => Some(Value::Int(self.priority)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "magna", priority: 2 },
            Row { id: 2, name: "Magnet", priority: 1 },
            Row { id: 3, name: "eu fugiat", priority: 2 },
        ]
    }

    #[test]
    fn empty_query_sorts_by_id_ascending() {
        let filter = ProjectQuery::default().to_filter();
        assert!(filter.predicates().is_empty());
        assert_eq!(filter.sort(), Sort::default());
    }

    #[test]
    fn blank_name_and_non_positive_priority_are_ignored() {
        let query = ProjectQuery {
            filter_name: Some("   ".into()),
            filter_priority: Some(0),
            ..Default::default()
        };
        assert!(query.to_filter().predicates().is_empty());
    }

    #[test]
    fn project_query_composes_every_parameter() {
        let start: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let query = ProjectQuery {
            filter_name: Some("Demo".into()),
            filter_priority: Some(3),
            filter_status: Some(ProjectStatus::Active),
            filter_start_date: Some(start),
            filter_end_date: None,
            sort_by: Some(ProjectSortOrder::PriorityDesc),
        };
        let filter = query.to_filter();

        assert_eq!(
            filter.predicates(),
            &[
                Predicate::Contains {
                    field: Field::Name,
                    needle: "Demo".into()
                },
                Predicate::Equals {
                    field: Field::Priority,
                    value: Value::Int(3)
                },
                Predicate::Equals {
                    field: Field::Status,
                    value: Value::Status(2)
                },
                Predicate::Equals {
                    field: Field::StartDate,
                    value: Value::Timestamp(start)
                },
            ]
        );
        assert_eq!(filter.sort(), ProjectSortOrder::PriorityDesc.sort());
    }

    #[test]
    fn task_query_filters_by_project() {
        let query = TaskQuery {
            filter_project: Some(7),
            ..Default::default()
        };
        assert_eq!(
            query.to_filter().predicates(),
            &[Predicate::Equals {
                field: Field::ProjectId,
                value: Value::Id(7)
            }]
        );
    }

    #[test]
    fn contains_is_case_sensitive() {
        let rows = rows();
        let found = Filter::new().contains(Field::Name, "magn").apply(&rows);
        assert_eq!(found, vec![rows[0].clone()]);
    }

    #[test]
    fn unmatched_filter_yields_empty_result() {
        let rows = rows();
        let found = Filter::new()
            .contains(Field::Name, "this doesnt exist")
            .apply(&rows);
        assert!(found.is_empty());
    }

    #[test]
    fn missing_field_never_matches() {
        let rows = rows();
        let found = Filter::new().equals(Field::ProjectId, 1_i64).apply(&rows);
        assert!(found.is_empty());
    }

    #[test]
    fn descending_sort_breaks_ties_by_id() {
        let rows = rows();
        let sorted = Filter::new()
            .sorted_by(Sort {
                field: Field::Priority,
                direction: Direction::Desc,
            })
            .apply(&rows);
        let ids: Vec<DbId> = sorted.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn empty_query_values_deserialize_as_absent() {
        let query: ProjectQuery = serde_json::from_value(serde_json::json!({
            "filter_priority": "",
            "filter_status": "",
            "filterStartDate": " ",
            "filter_end_date": "",
            "sort_by": "",
        }))
        .unwrap();
        assert_eq!(query.filter_priority, None);
        assert_eq!(query.filter_status, None);
        assert_eq!(query.filter_start_date, None);
        assert_eq!(query.sort_by, None);

        let query: TaskQuery = serde_json::from_value(serde_json::json!({
            "filter_project": "",
            "sortBy": "",
        }))
        .unwrap();
        assert!(query.to_filter().predicates().is_empty());
    }

    #[test]
    fn query_values_are_parsed_from_strings() {
        let query: TaskQuery = serde_json::from_value(serde_json::json!({
            "filter_priority": "4",
            "filter_status": "Done",
            "filter_project": "12",
            "sort_by": "NameDesc",
        }))
        .unwrap();
        assert_eq!(query.filter_priority, Some(4));
        assert_eq!(query.filter_status, Some(TaskStatus::Done));
        assert_eq!(query.filter_project, Some(12));
        assert_eq!(query.sort_by, Some(TaskSortOrder::NameDesc));

        let bad = serde_json::from_value::<TaskQuery>(serde_json::json!({"sort_by": "Sideways"}));
        assert!(bad.is_err());
    }
}
