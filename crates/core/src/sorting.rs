//! Sort orders accepted by the list endpoints.

use serde::{Deserialize, Serialize};

use crate::filter::{Direction, Field, Sort};

/// Sort orders for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSortOrder {
    NameAsc,
    NameDesc,
    StartDateAsc,
    StartDateDesc,
    CompleteDateAsc,
    CompleteDateDesc,
    StatusAsc,
    StatusDesc,
    PriorityAsc,
    PriorityDesc,
}

impl ProjectSortOrder {
    pub fn sort(self) -> Sort {
        use Direction::{Asc, Desc};
        let (field, direction) = match self {
            ProjectSortOrder::NameAsc => (Field::Name, Asc),
            ProjectSortOrder::NameDesc => (Field::Name, Desc),
            ProjectSortOrder::StartDateAsc => (Field::StartDate, Asc),
            ProjectSortOrder::StartDateDesc => (Field::StartDate, Desc),
            ProjectSortOrder::CompleteDateAsc => (Field::CompleteDate, Asc),
            ProjectSortOrder::CompleteDateDesc => (Field::CompleteDate, Desc),
            ProjectSortOrder::StatusAsc => (Field::Status, Asc),
            ProjectSortOrder::StatusDesc => (Field::Status, Desc),
            ProjectSortOrder::PriorityAsc => (Field::Priority, Asc),
            ProjectSortOrder::PriorityDesc => (Field::Priority, Desc),
        };
        Sort { field, direction }
    }
}

/// Sort orders for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSortOrder {
    NameAsc,
    NameDesc,
    PriorityAsc,
    PriorityDesc,
    StatusAsc,
    StatusDesc,
}

impl TaskSortOrder {
    pub fn sort(self) -> Sort {
        use Direction::{Asc, Desc};
        let (field, direction) = match self {
            TaskSortOrder::NameAsc => (Field::Name, Asc),
            TaskSortOrder::NameDesc => (Field::Name, Desc),
            TaskSortOrder::PriorityAsc => (Field::Priority, Asc),
            TaskSortOrder::PriorityDesc => (Field::Priority, Desc),
            TaskSortOrder::StatusAsc => (Field::Status, Asc),
            TaskSortOrder::StatusDesc => (Field::Status, Desc),
        };
        Sort { field, direction }
    }
}
