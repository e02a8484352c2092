//! Infrastructure layer
//!
//! Concrete adapters for the domain ports: configuration loading, password
//! hashing, token signing and user persistence.

pub mod config;
pub mod persistence;
pub mod security;
