//! Family boundary traits
//!
//! The engine only reads a family through these capabilities, so any backing
//! store (in-memory tree, database rows, test doubles) can provide one.

use chrono::NaiveDate;

use crate::domain::Heritage;

/// A member of a family tree.
pub trait Member: Send + Sync {
    /// Name used to look the member up. Unique within a family.
    fn name(&self) -> &str;

    /// Date of birth.
    fn birth_date(&self) -> NaiveDate;

    /// What the member owns by itself.
    fn heritage(&self) -> Heritage;

    /// Direct descendants. Order carries no meaning.
    fn children(&self) -> Vec<&dyn Member>;
}

/// A family tree with a single root.
pub trait Family: Send + Sync {
    /// Root member, None for an empty family.
    fn root_member(&self) -> Option<&dyn Member>;
}

/// In-memory family member owning its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    name: String,
    birth_date: NaiveDate,
    heritage: Heritage,
    children: Vec<FamilyMember>,
}

impl FamilyMember {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, heritage: Heritage) -> Self {
        Self {
            name: name.into(),
            birth_date,
            heritage,
            children: Vec::new(),
        }
    }

    /// Append one child.
    pub fn with_child(mut self, child: FamilyMember) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, keeping their order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = FamilyMember>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Member for FamilyMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    fn heritage(&self) -> Heritage {
        self.heritage
    }

    fn children(&self) -> Vec<&dyn Member> {
        self.children.iter().map(|c| c as &dyn Member).collect()
    }
}

/// In-memory family, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyTree {
    root: Option<FamilyMember>,
}

impl FamilyTree {
    pub fn new(root: FamilyMember) -> Self {
        Self { root: Some(root) }
    }

    /// A family without any member.
    pub fn empty() -> Self {
        Self { root: None }
    }
}

impl Family for FamilyTree {
    fn root_member(&self) -> Option<&dyn Member> {
        self.root.as_ref().map(|r| r as &dyn Member)
    }
}
