//! Shared types and logic for the Procurement Dashboard
//!
//! This crate contains the domain documents and the pure decision logic
//! (material-request filtering/aggregation, outstanding-quantity
//! resolution, reference-table mappings, tree selection) shared between
//! the backend and the browser (via WASM).

pub mod filter;
pub mod mappings;
pub mod models;
pub mod normalize;
pub mod outstanding;
pub mod pricing;
pub mod selection;
pub mod summary;
pub mod validation;

pub use filter::*;
pub use mappings::*;
pub use models::*;
pub use normalize::*;
pub use outstanding::*;
pub use pricing::*;
pub use selection::*;
pub use summary::*;
pub use validation::*;
