//! HTTP request handlers

pub mod dashboard;
pub mod health;
pub mod item;
pub mod material_request;
pub mod reference;
pub mod region;
pub mod supplier;
pub mod transaction;

pub use dashboard::*;
pub use health::*;
pub use item::*;
pub use material_request::*;
pub use reference::*;
pub use region::*;
pub use supplier::*;
pub use transaction::*;
