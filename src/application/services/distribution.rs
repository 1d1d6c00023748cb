//! Heritage distribution service
//!
//! Walks a family from its root towards the requested member, handing money,
//! properties and land down at every step:
//!
//! - a dead member splits everything it owns plus what it received among its
//!   children (sorted by birth date, then name);
//! - a living member passes on half of the money it received, nothing else;
//! - the requested member keeps what reaches it and the walk stops there.

use std::cmp::Ordering;

use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, instrument, trace, Level};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::distribution::{alive_allotment, deceased_allotment, target_holding};
use crate::domain::heritage::{check_land_extension_unit_price, check_property_price};
use crate::domain::{is_deceased, DomainError, DomainResult, Heritage};
use crate::infrastructure::display::MemberTreeConvert;
use crate::infrastructure::traits::{Family, Member};

/// Generations rendered when tracing the family tree.
const TRACE_RENDER_DEPTH: usize = 8;

/// Computes what a named member ends up holding.
///
/// Holds only the prices used to value the result and the recursion guard;
/// every query is independent and side-effect free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionService {
    property_price: i64,
    land_extension_unit_price: i64,
    max_depth: usize,
}

/// Role of a visited member for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Target,
    Deceased,
    Alive,
}

#[derive(Debug)]
struct Query<'a> {
    name: &'a str,
    evaluation_date: NaiveDate,
}

impl Visit {
    fn of(member: &dyn Member, query: &Query<'_>) -> Self {
        if member.name() == query.name {
            Visit::Target
        } else if is_deceased(member.birth_date(), query.evaluation_date) {
            Visit::Deceased
        } else {
            Visit::Alive
        }
    }
}

impl DistributionService {
    /// Generations searched before giving up with `TreeTooDeep`.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Create a service valuing properties and land at the given prices.
    ///
    /// # Errors
    /// `InvalidPropertyPrice` / `InvalidLandExtensionUnitPrice` for negative prices.
    pub fn new(property_price: i64, land_extension_unit_price: i64) -> ApplicationResult<Self> {
        check_property_price(property_price)?;
        check_land_extension_unit_price(land_extension_unit_price)?;
        Ok(Self {
            property_price,
            land_extension_unit_price,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        })
    }

    /// Create a service from loaded settings.
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let service = Self::new(settings.prices.property, settings.prices.land_extension_m2)?;
        Ok(service.with_max_depth(settings.max_depth))
    }

    /// Limit the number of generations a search may descend.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn property_price(&self) -> i64 {
        self.property_price
    }

    pub fn land_extension_unit_price(&self) -> i64 {
        self.land_extension_unit_price
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Total value the named member holds at `evaluation_date`.
    ///
    /// # Errors
    /// - `EmptyName` for an empty name
    /// - `MemberNotFound` for an empty family or an unknown name
    /// - `MemberCannotBeDead` if the member has reached the death age
    /// - `TreeTooDeep` if the search exceeds the configured depth
    #[instrument(level = "debug", skip(self, family))]
    pub fn heritage_by_name(
        &self,
        name: &str,
        family: &dyn Family,
        evaluation_date: NaiveDate,
    ) -> ApplicationResult<i64> {
        let holding = self.holding_by_name(name, family, evaluation_date)?;
        let total = holding.total(self.property_price, self.land_extension_unit_price)?;
        debug!("heritage_by_name: {} holds {} worth {}", name, holding, total);
        Ok(total)
    }

    /// Heritage the named member holds at `evaluation_date`, before valuation.
    ///
    /// Fails like [`DistributionService::heritage_by_name`].
    #[instrument(level = "debug", skip(self, family))]
    pub fn holding_by_name(
        &self,
        name: &str,
        family: &dyn Family,
        evaluation_date: NaiveDate,
    ) -> ApplicationResult<Heritage> {
        if name.is_empty() {
            return Err(DomainError::EmptyName.into());
        }

        let root = family
            .root_member()
            .ok_or_else(|| DomainError::MemberNotFound(name.to_string()))?;

        if tracing::enabled!(Level::TRACE) {
            trace!("family:\n{}", root.to_tree_string(TRACE_RENDER_DEPTH));
        }

        let query = Query {
            name,
            evaluation_date,
        };
        let holding = self
            .search(&query, root, Heritage::EMPTY, 1)?
            .ok_or_else(|| DomainError::MemberNotFound(name.to_string()))?;

        Ok(holding)
    }

    #[instrument(level = "trace", skip_all, fields(member = member.name(), depth = depth))]
    fn search(
        &self,
        query: &Query<'_>,
        member: &dyn Member,
        incoming: Heritage,
        depth: usize,
    ) -> DomainResult<Option<Heritage>> {
        if depth > self.max_depth {
            return Err(DomainError::TreeTooDeep {
                limit: self.max_depth,
            });
        }

        match Visit::of(member, query) {
            Visit::Target => self.target_heritage(query, member, &incoming).map(Some),
            Visit::Deceased => self.distribute_deceased(query, member, &incoming, depth),
            Visit::Alive => self.distribute_alive(query, member, &incoming, depth),
        }
    }

    fn target_heritage(
        &self,
        query: &Query<'_>,
        member: &dyn Member,
        incoming: &Heritage,
    ) -> DomainResult<Heritage> {
        if is_deceased(member.birth_date(), query.evaluation_date) {
            return Err(DomainError::MemberCannotBeDead(member.name().to_string()));
        }

        let has_children = !member.children().is_empty();
        let holding = target_holding(&member.heritage(), incoming, has_children)?;
        debug!("target {}: received {}, holds {}", member.name(), incoming, holding);
        Ok(holding)
    }

    fn distribute_deceased(
        &self,
        query: &Query<'_>,
        member: &dyn Member,
        incoming: &Heritage,
        depth: usize,
    ) -> DomainResult<Option<Heritage>> {
        let children = sorted_siblings(member.children())?;
        if children.is_empty() {
            trace!("deceased {} has no heirs", member.name());
            return Ok(None);
        }

        let total = member.heritage().checked_add(incoming)?;
        let num_children = children.len();
        debug!(
            "deceased {}: distributing {} among {} children",
            member.name(),
            total,
            num_children
        );

        for (index, child) in children.into_iter().enumerate() {
            let allotment = deceased_allotment(&total, num_children, index)?;
            if let Some(found) = self.search(query, child, allotment, depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn distribute_alive(
        &self,
        query: &Query<'_>,
        member: &dyn Member,
        incoming: &Heritage,
        depth: usize,
    ) -> DomainResult<Option<Heritage>> {
        let children = member.children();
        if children.is_empty() {
            trace!("alive {} has no descendants", member.name());
            return Ok(None);
        }

        let allotment = alive_allotment(incoming, children.len())?;
        trace!("alive {}: each child receives {}", member.name(), allotment);

        for child in children {
            if let Some(found) = self.search(query, child, allotment, depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Birth date ascending, then name ascending.
fn sibling_order(a: &dyn Member, b: &dyn Member) -> Ordering {
    a.birth_date()
        .cmp(&b.birth_date())
        .then_with(|| a.name().cmp(b.name()))
}

/// Sort siblings into the order that decides land and property shares.
///
/// The order must be strict: two siblings with the same birth date and name
/// cannot be told apart and are rejected.
fn sorted_siblings<'a>(children: Vec<&'a dyn Member>) -> DomainResult<Vec<&'a dyn Member>> {
    let sorted: Vec<&'a dyn Member> = children
        .into_iter()
        .sorted_by(|a, b| sibling_order(*a, *b))
        .collect();

    if let Some((twin, _)) = sorted
        .iter()
        .copied()
        .tuple_windows()
        .find(|(a, b)| sibling_order(*a, *b) == Ordering::Equal)
    {
        return Err(DomainError::AmbiguousSiblingOrder(twin.name().to_string()));
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::FamilyMember;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(name: &str, birth: NaiveDate) -> FamilyMember {
        FamilyMember::new(name, birth, Heritage::EMPTY)
    }

    #[test]
    fn given_siblings_when_sorting_then_orders_by_birth_then_name() {
        let c = member("C", ymd(1950, 1, 1));
        let b = member("B", ymd(1950, 1, 1));
        let a = member("A", ymd(1960, 1, 1));
        let children: Vec<&dyn Member> = vec![&a, &c, &b];

        let sorted = sorted_siblings(children).unwrap();

        let names: Vec<&str> = sorted.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn given_twin_siblings_with_same_name_when_sorting_then_rejects() {
        let first = member("B", ymd(1950, 1, 1));
        let second = member("B", ymd(1950, 1, 1));
        let children: Vec<&dyn Member> = vec![&first, &second];

        let result = sorted_siblings(children);

        assert_eq!(
            result.err(),
            Some(DomainError::AmbiguousSiblingOrder("B".to_string()))
        );
    }

    #[test]
    fn given_member_when_classifying_then_name_wins_over_age() {
        let query = Query {
            name: "A",
            evaluation_date: ymd(2200, 1, 1),
        };
        let old = member("A", ymd(1900, 1, 1));
        let other = member("B", ymd(1900, 1, 1));
        let young = member("C", ymd(2150, 1, 1));

        assert_eq!(Visit::of(&old, &query), Visit::Target);
        assert_eq!(Visit::of(&other, &query), Visit::Deceased);
        assert_eq!(Visit::of(&young, &query), Visit::Alive);
    }
}
