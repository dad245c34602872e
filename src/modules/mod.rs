//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the remote bill store.

pub mod store;
