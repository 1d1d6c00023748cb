//! Infrastructure layer: family boundary traits and their in-memory implementation

pub mod display;
pub mod traits;

pub use display::MemberTreeConvert;
pub use traits::{Family, FamilyMember, FamilyTree, Member};
