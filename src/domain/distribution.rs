//! Share formulas applied at each step of the downward distribution.
//!
//! Everything here is pure integer arithmetic on non-negative amounts. Rounding
//! is half away from zero, which for non-negative operands is
//! `floor((2a + b) / 2b)`; intermediates are widened to `i128` so the formulas
//! cannot overflow for any valid `i64` input.

use crate::domain::error::DomainResult;
use crate::domain::heritage::Heritage;

/// `round(numerator / denominator)`, halves rounded up.
///
/// Both operands must be non-negative and `denominator` non-zero.
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(numerator >= 0 && denominator > 0);
    let n = i128::from(numerator);
    let d = i128::from(denominator);
    // result <= numerator, so it always fits back into i64
    ((2 * n + d) / (2 * d)) as i64
}

/// `round(amount / 2)`: the part of received money a living parent keeps
/// passing down (or a target with children keeps for itself).
pub fn halve(amount: i64) -> i64 {
    round_div(amount, 2)
}

/// Money each of `num_children` children gets from a dead parent.
///
/// Every child gets the same rounded share; the rounding error is dropped,
/// so the shares may not add up to `total`.
pub fn money_share(total: i64, num_children: usize) -> i64 {
    round_div(total, children_as_i64(num_children))
}

/// Properties child `index` (0-based, in sibling order) gets out of `total`.
///
/// `floor((P + n - 1 - i) / 2n) + floor((P + n + i) / 2n)`
///
/// Summed over all children this is exactly `total`, and no two children
/// differ by more than one property.
pub fn property_share(total: i64, num_children: usize, index: usize) -> i64 {
    debug_assert!(index < num_children);
    let p = i128::from(total);
    let n = num_children as i128;
    let i = index as i128;
    let share = (p + n - 1 - i).div_euclid(2 * n) + (p + n + i).div_euclid(2 * n);
    share as i64
}

/// Land is indivisible: the first child in sibling order takes all of it.
pub fn land_share(total: i64, index: usize) -> i64 {
    if index == 0 {
        total
    } else {
        0
    }
}

/// What child `index` receives from a dead parent whose holdings (own plus
/// received) are `total`.
pub fn deceased_allotment(total: &Heritage, num_children: usize, index: usize) -> DomainResult<Heritage> {
    Heritage::new(
        money_share(total.money(), num_children),
        property_share(total.properties(), num_children, index),
        land_share(total.land_extension(), index),
    )
}

/// What each child of a living, non-target member receives.
///
/// Only half of the received money moves on, split evenly; properties and
/// land are not handed down by the living.
pub fn alive_allotment(incoming: &Heritage, num_children: usize) -> DomainResult<Heritage> {
    let share = round_div(halve(incoming.money()), children_as_i64(num_children));
    Heritage::new(share, 0, 0)
}

/// Final holdings of the target member.
///
/// Money received is halved when the target has descendants of its own;
/// properties and land are always kept in full.
pub fn target_holding(own: &Heritage, incoming: &Heritage, has_children: bool) -> DomainResult<Heritage> {
    let received_money = if has_children {
        halve(incoming.money())
    } else {
        incoming.money()
    };
    let received = Heritage::new(received_money, incoming.properties(), incoming.land_extension())?;
    own.checked_add(&received)
}

fn children_as_i64(num_children: usize) -> i64 {
    debug_assert!(num_children > 0);
    i64::try_from(num_children).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1000, 2, 500)]
    #[case(500, 3, 167)]
    #[case(250, 3, 83)]
    #[case(5, 2, 3)]
    #[case(1, 2, 1)]
    #[case(0, 7, 0)]
    #[case(7, 1, 7)]
    fn round_div_rounds_half_up(#[case] numerator: i64, #[case] denominator: i64, #[case] expected: i64) {
        assert_eq!(round_div(numerator, denominator), expected);
    }

    #[test]
    fn round_div_handles_extreme_values() {
        assert_eq!(round_div(i64::MAX, 1), i64::MAX);
        assert_eq!(round_div(i64::MAX, i64::MAX), 1);
    }

    #[test]
    fn given_ten_properties_and_four_children_when_splitting_then_matches_formula() {
        let shares: Vec<i64> = (0..4).map(|i| property_share(10, 4, i)).collect();
        assert_eq!(shares, vec![2, 2, 3, 3]);
    }

    #[test]
    fn given_single_child_when_splitting_then_child_gets_everything() {
        assert_eq!(property_share(2, 1, 0), 2);
        assert_eq!(property_share(0, 1, 0), 0);
    }

    #[test]
    fn given_second_child_when_sharing_land_then_gets_nothing() {
        assert_eq!(land_share(100, 0), 100);
        assert_eq!(land_share(100, 1), 0);
        assert_eq!(land_share(100, 5), 0);
    }

    #[test]
    fn given_uneven_money_when_sharing_then_rounding_is_not_redistributed() {
        // 1000 / 3 = 333.33 → every child gets 333, one unit is lost
        let shares: Vec<i64> = (0..3).map(|_| money_share(1000, 3)).collect();
        assert_eq!(shares, vec![333, 333, 333]);
        assert_eq!(shares.iter().sum::<i64>(), 999);
    }

    #[test]
    fn given_living_parent_when_allotting_then_only_halved_money_moves_on() {
        let incoming = Heritage::new(500, 4, 80).unwrap();

        let allotment = alive_allotment(&incoming, 3).unwrap();

        assert_eq!(allotment, Heritage::new(83, 0, 0).unwrap());
    }

    #[test]
    fn given_target_with_children_when_holding_then_money_is_halved_but_assets_kept() {
        let own = Heritage::new(10, 1, 1).unwrap();
        let incoming = Heritage::new(500, 2, 100).unwrap();

        let holding = target_holding(&own, &incoming, true).unwrap();

        assert_eq!(holding, Heritage::new(260, 3, 101).unwrap());
    }

    #[test]
    fn given_childless_target_when_holding_then_keeps_all_money() {
        let own = Heritage::new(10, 0, 0).unwrap();
        let incoming = Heritage::new(500, 2, 100).unwrap();

        let holding = target_holding(&own, &incoming, false).unwrap();

        assert_eq!(holding, Heritage::new(510, 2, 100).unwrap());
    }

    proptest! {
        /// The balanced split hands out every property exactly once.
        #[test]
        fn property_split_is_exact(total in 0i64..100_000, n in 1usize..64) {
            let sum: i64 = (0..n).map(|i| property_share(total, n, i)).sum();
            prop_assert_eq!(sum, total);
        }

        /// No child gets more than one property above any sibling.
        #[test]
        fn property_split_is_balanced(total in 0i64..100_000, n in 1usize..64) {
            let shares: Vec<i64> = (0..n).map(|i| property_share(total, n, i)).collect();
            let max = shares.iter().max().copied().unwrap_or(0);
            let min = shares.iter().min().copied().unwrap_or(0);
            prop_assert!(max - min <= 1, "shares {:?}", shares);
        }

        /// Land never reaches anyone but the first sibling.
        #[test]
        fn land_goes_to_first_child_only(total in 0i64..1_000_000, n in 1usize..32) {
            let parent = Heritage::new(0, 0, total).unwrap();
            for i in 0..n {
                let allotment = deceased_allotment(&parent, n, i).unwrap();
                let expected = if i == 0 { total } else { 0 };
                prop_assert_eq!(allotment.land_extension(), expected);
            }
        }

        /// Money shares are identical and off from the total by less than n.
        #[test]
        fn money_shares_are_equal(total in 0i64..10_000_000, n in 1usize..32) {
            let share = money_share(total, n);
            let sum = share * n as i64;
            prop_assert!((sum - total).abs() < n as i64);
        }
    }
}
