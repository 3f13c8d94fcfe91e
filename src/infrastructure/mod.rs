//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Durable JSON slots
//! - Gateway: The remote catalog service client

pub mod config;
pub mod gateway;
pub mod storage;
