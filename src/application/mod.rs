//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - State: The in-memory catalog store
//! - Services: Catalog synchronization/mutation and session handling
//! - View: Derived filter/sort/paginate computation
//! - Validation: Declarative form rules
//! - Routes: Path contract and login guard
//! - Errors: Domain-specific errors

pub mod errors;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
pub mod view;
