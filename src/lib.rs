//! shopkeeper - a product catalog administration console
//!
//! Local durable state is the source of truth; a remote catalog service
//! is mirrored best-effort. Layers follow the usual split: domain
//! (entities and trait seams), application (state, services, derived
//! views), infrastructure (config, storage, HTTP gateway).

pub mod application;
pub mod domain;
pub mod infrastructure;
