//! Tests for dynamic tier pricing

use fusionx::{evaluate_tier_price, DynamicPricingConfig, PricingError, PricingTier, TierCategory};

fn regular_tier(base: i64, capacity: u32) -> PricingTier {
    PricingTier::new(TierCategory::Regular, base, capacity).unwrap()
}

#[test]
fn test_quote_is_base_price_when_disabled() {
    let tier = regular_tier(1500, 100);
    let config = DynamicPricingConfig::disabled();

    for booked in [0, 50, 100] {
        assert_eq!(evaluate_tier_price(&tier, &config, booked), 1500);
    }
}

#[test]
fn test_quote_is_base_price_below_threshold() {
    let tier = regular_tier(1500, 200);
    let config = DynamicPricingConfig::new(true, 75, 30).unwrap();

    // 149/200 = 74.5% occupancy, truncated to 74%
    assert_eq!(evaluate_tier_price(&tier, &config, 149), 1500);
}

#[test]
fn test_quote_steps_up_at_threshold() {
    let tier = regular_tier(1500, 200);
    let config = DynamicPricingConfig::new(true, 75, 30).unwrap();

    assert_eq!(evaluate_tier_price(&tier, &config, 150), 1950);
    // Higher occupancy does not step up again
    assert_eq!(evaluate_tier_price(&tier, &config, 200), 1950);
}

#[test]
fn test_quote_never_below_base_price() {
    let tier = regular_tier(777, 33);
    let config = DynamicPricingConfig::new(true, 10, 180).unwrap();

    for booked in 0..=33 {
        assert!(evaluate_tier_price(&tier, &config, booked) >= tier.base_price);
    }
}

#[test]
fn test_quote_is_pure() {
    let tier = regular_tier(2400, 120);
    let config = DynamicPricingConfig::new(true, 50, 15).unwrap();

    let quotes: Vec<i64> = (0..5)
        .map(|_| evaluate_tier_price(&tier, &config, 90))
        .collect();
    assert!(quotes.windows(2).all(|w| w[0] == w[1]));
    // Inputs are untouched
    assert_eq!(tier.current_price, 2400);
}

#[test]
fn test_invalid_configuration_is_rejected_up_front() {
    assert_eq!(
        PricingTier::new(TierCategory::Vip, 5000, 0).unwrap_err(),
        PricingError::InvalidCapacity
    );
    assert_eq!(
        PricingTier::new(TierCategory::Vip, -1, 10).unwrap_err(),
        PricingError::NegativePrice(-1)
    );
    assert!(matches!(
        DynamicPricingConfig::new(true, 0, 10).unwrap_err(),
        PricingError::InvalidThreshold(_)
    ));
    assert!(matches!(
        DynamicPricingConfig::new(true, 50, 250).unwrap_err(),
        PricingError::InvalidIncrease(_)
    ));
}
