//! Application layer: services and use cases
//!
//! This layer runs domain rules over families read through the boundary traits.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
