//! Application services - Business logic orchestration

pub mod catalog;
pub mod session;

pub use catalog::{merge_catalogs, CatalogService};
pub use session::{SessionManager, IDLE_TIMEOUT};
