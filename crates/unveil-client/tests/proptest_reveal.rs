//! Property-based tests for the reveal fraction
//!
//! These tests verify:
//! - The fraction stays inside [0, 1] for every (remaining, total) pair
//! - A zero total never divides: the fraction is pinned to zero
//! - Within one session the fraction is monotone as remaining falls
//! - The endpoints are exact: full time left is 0.0, expiry is 1.0

use proptest::prelude::*;
use unveil_client::reveal::revealed_fraction;

// ============================================================================
// Strategies
// ============================================================================

/// Generate (remaining, total) pairs with remaining at or under total
fn arb_in_session() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=86_400).prop_flat_map(|total| (0u32..=total, Just(total)))
}

// ============================================================================
// Reveal Fraction Properties
// ============================================================================

proptest! {
    /// Property: the fraction is always within [0, 1]
    #[test]
    fn prop_fraction_bounded(remaining in any::<u32>(), total in any::<u32>()) {
        let fraction = revealed_fraction(remaining, total);
        prop_assert!((0.0..=1.0).contains(&fraction), "fraction was: {fraction}");
    }

    /// Property: no session, no reveal
    #[test]
    fn prop_zero_total_pins_to_zero(remaining in any::<u32>()) {
        prop_assert_eq!(revealed_fraction(remaining, 0), 0.0);
    }

    /// Property: the fraction never decreases as remaining falls
    #[test]
    fn prop_monotone_within_a_session((remaining, total) in arb_in_session()) {
        let now = revealed_fraction(remaining, total);
        let next = revealed_fraction(remaining.saturating_sub(1), total);
        prop_assert!(next >= now, "fraction fell from {now} to {next}");
    }

    /// Property: full time left reveals nothing, expiry reveals everything
    #[test]
    fn prop_endpoints_are_exact(total in 1u32..=86_400) {
        prop_assert_eq!(revealed_fraction(total, total), 0.0);
        prop_assert_eq!(revealed_fraction(0, total), 1.0);
    }

    /// Property: remaining beyond the session total clamps to zero
    #[test]
    fn prop_overlong_remaining_clamps(total in 1u32..1000, extra in 1u32..1000) {
        prop_assert_eq!(revealed_fraction(total + extra, total), 0.0);
    }
}

// ============================================================================
// Non-Property Edge Case Tests
// ============================================================================

#[test]
fn test_half_way_is_exactly_half() {
    assert_eq!(revealed_fraction(30, 60), 0.5);
}
