//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services read families through the boundary traits (Family, Member)
//! but are themselves concrete structs, not traits.

mod distribution;

pub use distribution::DistributionService;
