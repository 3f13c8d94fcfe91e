//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Product, Session)
//! - Traits: Abstractions for infrastructure (DurableSlot, RemoteCatalog)

pub mod entities;
pub mod traits;
