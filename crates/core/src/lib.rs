//! Domain layer for the task tracker.
//!
//! Holds the entity model, the backend-agnostic query builder, the storage
//! contract with its in-memory backend, and the CRUD services that the HTTP
//! layer calls into.

pub mod error;
pub mod filter;
pub mod models;
pub mod services;
pub mod sorting;
pub mod status;
pub mod store;
pub mod types;
pub mod validation;
