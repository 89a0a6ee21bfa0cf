//! Pure pricing and bonus tables.
//!
//! Everything here is a total function of its arguments; state-aware pricing
//! lives in `domain::stocks`.

use crate::domain::state::Money;

/// Size component of a chain's pricing tier.
///
/// Chains below 2 tiles have no tier; callers guarantee the bound.
pub fn size_tier(size: usize) -> u8 {
    assert!(size >= 2, "a chain needs at least 2 tiles to be priced");
    match size {
        2 => 0,
        3 => 1,
        4 => 2,
        5 => 3,
        6..=10 => 4,
        11..=20 => 5,
        21..=30 => 6,
        31..=40 => 7,
        _ => 8,
    }
}

fn validate_tier(tier: u8) {
    assert!(tier <= 10, "pricing tier out of range: {tier}");
}

/// Share price at a pricing tier.
pub fn share_price(tier: u8) -> Money {
    validate_tier(tier);
    200 + 100 * tier as Money
}

/// Majority bonus paid to the largest shareholder.
pub fn first_bonus(tier: u8) -> Money {
    validate_tier(tier);
    2000 + 1000 * tier as Money
}

/// Majority bonus paid to the second-largest shareholder.
pub fn second_bonus(tier: u8) -> Money {
    validate_tier(tier);
    1000 + 500 * tier as Money
}

/// Evenly split `total` across `ways` recipients, rounding each share up to
/// the nearest 100.
pub fn bonus_split(total: Money, ways: usize) -> Money {
    debug_assert!(ways > 0, "cannot split a bonus zero ways");
    total.div_ceil(ways as Money * 100) * 100
}
