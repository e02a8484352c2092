//! User registration, login and JWT issuance.
//!
//! Layered as `domain` (entities, ports, the auth service), `application`
//! (use cases), `infrastructure` (config, argon2, JWT, stores) and
//! `adapters::http` (actix-web boundary).

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;
