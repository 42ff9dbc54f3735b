//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any executor, where a method must also run
//! inside a transaction) as the first argument.

pub mod project_repo;
pub mod task_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
