//! Domain entities - Core business objects with no external dependencies

pub mod product;
pub mod session;

pub use product::{next_id, Catalog, Product, Rating};
pub use session::{Activity, Session};
