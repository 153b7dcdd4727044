//! External API integrations

pub mod automation;
pub mod regions;

pub use automation::AutomationClient;
pub use regions::RegionsClient;
