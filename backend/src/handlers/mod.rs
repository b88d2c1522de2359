//! HTTP request handlers

pub mod health;
pub mod pricing;
pub mod validation;

pub use health::*;
pub use pricing::*;
pub use validation::*;
