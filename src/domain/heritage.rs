//! Heritage value object: money, properties and land owned or handed down.

use std::fmt;

use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

/// Immutable snapshot of what a member owns or receives.
///
/// All three components are non-negative; construction rejects anything else.
/// Values are `Copy`, every distribution step builds a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Heritage {
    /// Cash amount
    money: i64,
    /// Number of real-estate properties
    properties: i64,
    /// Land extension in m²
    land_extension: i64,
}

impl Heritage {
    /// Nothing at all. What the root of a family receives.
    pub const EMPTY: Heritage = Heritage {
        money: 0,
        properties: 0,
        land_extension: 0,
    };

    /// Create a heritage record.
    ///
    /// # Errors
    /// `InvalidMoneyAmount`, `InvalidPropertyCount` or `InvalidLandExtension`
    /// for the first negative argument, checked in that order.
    pub fn new(money: i64, properties: i64, land_extension: i64) -> DomainResult<Self> {
        if money < 0 {
            return Err(DomainError::InvalidMoneyAmount(money));
        }
        if properties < 0 {
            return Err(DomainError::InvalidPropertyCount(properties));
        }
        if land_extension < 0 {
            return Err(DomainError::InvalidLandExtension(land_extension));
        }
        Ok(Self {
            money,
            properties,
            land_extension,
        })
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn properties(&self) -> i64 {
        self.properties
    }

    pub fn land_extension(&self) -> i64 {
        self.land_extension
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Component-wise sum, e.g. a member's own holdings plus what it received.
    pub fn checked_add(&self, other: &Heritage) -> DomainResult<Heritage> {
        Ok(Self {
            money: add(self.money, other.money, "money")?,
            properties: add(self.properties, other.properties, "properties")?,
            land_extension: add(self.land_extension, other.land_extension, "land extension")?,
        })
    }

    /// Total monetary value at the given prices.
    ///
    /// `money + properties * property_price + land_extension * land_extension_unit_price`
    ///
    /// Arithmetic is done in `i64`; a result that does not fit is reported as
    /// `ValueOverflow` rather than wrapped.
    pub fn total(&self, property_price: i64, land_extension_unit_price: i64) -> DomainResult<i64> {
        check_property_price(property_price)?;
        check_land_extension_unit_price(land_extension_unit_price)?;

        let properties_value = self
            .properties
            .checked_mul(property_price)
            .ok_or(DomainError::ValueOverflow("properties value"))?;
        let land_value = self
            .land_extension
            .checked_mul(land_extension_unit_price)
            .ok_or(DomainError::ValueOverflow("land extension value"))?;

        self.money
            .checked_add(properties_value)
            .and_then(|v| v.checked_add(land_value))
            .ok_or(DomainError::ValueOverflow("heritage total"))
    }
}

impl fmt::Display for Heritage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "money={} properties={} land={}m²",
            self.money, self.properties, self.land_extension
        )
    }
}

fn add(a: i64, b: i64, what: &'static str) -> DomainResult<i64> {
    a.checked_add(b).ok_or(DomainError::ValueOverflow(what))
}

/// Reject a negative price per property.
pub fn check_property_price(property_price: i64) -> DomainResult<()> {
    if property_price < 0 {
        return Err(DomainError::InvalidPropertyPrice(property_price));
    }
    Ok(())
}

/// Reject a negative price per m² of land.
pub fn check_land_extension_unit_price(land_extension_unit_price: i64) -> DomainResult<()> {
    if land_extension_unit_price < 0 {
        return Err(DomainError::InvalidLandExtensionUnitPrice(
            land_extension_unit_price,
        ));
    }
    Ok(())
}
