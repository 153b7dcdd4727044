//! Business logic services for the Procurement Management Dashboard

pub mod item;
pub mod material_request;
pub mod reference;
pub mod supplier;
pub mod transaction;

pub use item::ItemService;
pub use material_request::MaterialRequestService;
pub use reference::ReferenceService;
pub use supplier::SupplierService;
pub use transaction::TransactionService;
