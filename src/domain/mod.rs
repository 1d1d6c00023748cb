//! Domain layer: the heritage value object and the distribution rules
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod age;
pub mod distribution;
pub mod error;
pub mod heritage;

pub use age::{age_at, is_deceased, DEATH_AGE};
pub use error::{DomainError, DomainResult};
pub use heritage::Heritage;
