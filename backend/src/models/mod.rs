//! Database models for the Procurement Management Dashboard
//!
//! The backend stores exactly the shared domain documents; re-export them
//! so services and handlers can use `crate::models` paths.

pub use shared::models::*;
