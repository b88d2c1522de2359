//! Domain models for the Courier Pricing Platform

mod demand;
mod order;
mod pricing;
mod service;
mod time;
mod weather;

pub use demand::*;
pub use order::*;
pub use pricing::*;
pub use service::*;
pub use time::*;
pub use weather::*;
