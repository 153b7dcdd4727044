//! Domain documents for the Procurement Dashboard

mod category;
mod item;
mod material_request;
mod supplier;
mod transaction;

pub use category::*;
pub use item::*;
pub use material_request::*;
pub use supplier::*;
pub use transaction::*;
