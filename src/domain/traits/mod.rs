//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod slot;

pub use gateway::{RemoteAck, RemoteCatalog};
pub use slot::DurableSlot;
