//! Heritage distribution engine.
//!
//! Computes what a member of a family tree ends up holding once the money,
//! properties and land of its dead ancestors have been handed down, and values
//! it at configurable prices.
//!
//! ```ignore
//! let service = DistributionService::new(1_000_000, 300)?;
//! let total = service.heritage_by_name("D", &family, evaluation_date)?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::services::DistributionService;
pub use application::{ApplicationError, ApplicationResult};
pub use config::Settings;
pub use domain::{DomainError, DomainResult, Heritage};
pub use infrastructure::{Family, FamilyMember, FamilyTree, Member};
