//! Shared types and computation for the AgriDash platform
//!
//! This crate contains the domain models, the report generator, and the
//! boundary geometry shared between the backend and the browser (via WASM).

pub mod geo;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use geo::*;
pub use models::*;
pub use types::*;
pub use validation::*;
