//! Web plumbing shared by catcollector services.
//!
//! Render instructions, tracing setup, request-id/trace layers, health
//! handlers and serde helpers.

pub mod health;
pub mod middleware;
pub mod render;
pub mod serde;
pub mod tracing;
