//! CRUD services.
//!
//! Services own the argument checks (positive ids, present and valid
//! payloads, cross-entity consistency) and delegate persistence to the
//! stores they were constructed with.

pub mod project;
pub mod task;

pub use project::ProjectService;
pub use task::TaskService;
