//! Shared types and models for the Courier Pricing Platform
//!
//! This crate contains the pricing domain shared between the backend, the
//! booking client (via WASM), and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
