//! Dynamic tier pricing for FusionX events.
//!
//! Each event sells tickets through one or more pricing tiers. A tier quotes
//! its base price until demand crosses the event's configured occupancy
//! threshold, after which the quote steps up by a configured percentage.
//!
//! Price evaluation is a pure function of the tier, the event's dynamic
//! pricing config, and the current booked count. There is no persistent
//! ratchet: if bookings are cancelled and occupancy drops back below the
//! threshold, the quote returns to the base price.
//!
//! # Example
//!
//! ```rust,ignore
//! use fusionx::pricing::{DynamicPricingConfig, PricingTier, TierCategory, evaluate_tier_price};
//!
//! let tier = PricingTier::new(TierCategory::Regular, 1500, 100)?;
//! let config = DynamicPricingConfig::new(true, 80, 25)?;
//!
//! // 85 of 100 seats booked: 85% >= 80% threshold, quote steps up 25%.
//! assert_eq!(evaluate_tier_price(&tier, &config, 85), 1875);
//! ```

use serde::{Deserialize, Serialize};

/// Pricing-configuration errors.
///
/// These are raised at construction time so that `evaluate_tier_price`
/// never has to guard against divide-by-zero or out-of-range percentages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("tier capacity must be greater than zero")]
    InvalidCapacity,

    #[error("threshold percentage must be within 1..=100, got {0}")]
    InvalidThreshold(i64),

    #[error("price increase percentage must be within 1..=200, got {0}")]
    InvalidIncrease(i64),

    #[error("price must not be negative, got {0}")]
    NegativePrice(i64),
}

/// Named pricing category for an event tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierCategory {
    EarlyBird,
    Regular,
    Vip,
    Premium,
    Student,
    Group,
}

impl TierCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyBird => "early_bird",
            Self::Regular => "regular",
            Self::Vip => "vip",
            Self::Premium => "premium",
            Self::Student => "student",
            Self::Group => "group",
        }
    }

    /// Human-readable label used on tickets and invoices.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EarlyBird => "Early Bird",
            Self::Regular => "Regular",
            Self::Vip => "VIP",
            Self::Premium => "Premium",
            Self::Student => "Student",
            Self::Group => "Group",
        }
    }
}

impl std::str::FromStr for TierCategory {
    type Err = TierCategoryParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "early_bird" => Ok(Self::EarlyBird),
            "regular" => Ok(Self::Regular),
            "vip" => Ok(Self::Vip),
            "premium" => Ok(Self::Premium),
            "student" => Ok(Self::Student),
            "group" => Ok(Self::Group),
            _ => Err(TierCategoryParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid tier category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierCategoryParseError(pub String);

impl std::fmt::Display for TierCategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier category: '{}'", self.0)
    }
}

impl std::error::Error for TierCategoryParseError {}

impl std::fmt::Display for TierCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single pricing tier on an event.
///
/// Amounts are whole rupees; there is no minor-unit handling anywhere in
/// this subsystem. `current_price` is the last quoted price and is always
/// `>= base_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub category: TierCategory,
    pub base_price: i64,
    pub current_price: i64,
    pub max_tickets: u32,
    #[serde(default)]
    pub description: String,
}

impl PricingTier {
    /// Create a tier quoting its base price.
    ///
    /// Fails fast on zero capacity or a negative price so downstream price
    /// evaluation never sees degenerate input.
    pub fn new(
        category: TierCategory,
        base_price: i64,
        max_tickets: u32,
    ) -> std::result::Result<Self, PricingError> {
        if max_tickets == 0 {
            return Err(PricingError::InvalidCapacity);
        }
        if base_price < 0 {
            return Err(PricingError::NegativePrice(base_price));
        }
        Ok(Self {
            category,
            base_price,
            current_price: base_price,
            max_tickets,
            description: String::new(),
        })
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Occupancy as a percentage of capacity, given a booked count.
    #[must_use]
    pub fn occupancy_percent(&self, booked: u32) -> u32 {
        (booked as u64 * 100 / self.max_tickets as u64) as u32
    }

    /// Return a copy of this tier with `current_price` set to the evaluated
    /// quote. This is the shape the event-edit flow persists.
    #[must_use]
    pub fn with_quoted_price(&self, config: &DynamicPricingConfig, booked: u32) -> Self {
        let mut tier = self.clone();
        tier.current_price = evaluate_tier_price(self, config, booked);
        tier
    }
}

/// Event-level dynamic pricing configuration.
///
/// Applies to every tier on the event. Consulted read-only at booking time;
/// the pricing check never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicPricingConfig {
    pub enabled: bool,
    pub threshold_percentage: u32,
    pub price_increase_percentage: u32,
}

impl DynamicPricingConfig {
    /// Create a validated config.
    ///
    /// `threshold_percentage` must be within 1..=100 and
    /// `price_increase_percentage` within 1..=200.
    pub fn new(
        enabled: bool,
        threshold_percentage: u32,
        price_increase_percentage: u32,
    ) -> std::result::Result<Self, PricingError> {
        if !(1..=100).contains(&threshold_percentage) {
            return Err(PricingError::InvalidThreshold(threshold_percentage as i64));
        }
        if !(1..=200).contains(&price_increase_percentage) {
            return Err(PricingError::InvalidIncrease(price_increase_percentage as i64));
        }
        Ok(Self {
            enabled,
            threshold_percentage,
            price_increase_percentage,
        })
    }

    /// A config with dynamic pricing switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            threshold_percentage: 100,
            price_increase_percentage: 1,
        }
    }
}

/// Quote a tier's current price given demand.
///
/// Pure and idempotent: the same inputs always produce the same quote, and
/// nothing is mutated. When dynamic pricing is disabled or occupancy is
/// below the threshold, the quote is exactly `base_price`. Once the booked
/// count reaches the threshold the quote is `base_price` increased by
/// `price_increase_percentage`, rounded half-up in integer arithmetic.
#[must_use]
pub fn evaluate_tier_price(
    tier: &PricingTier,
    config: &DynamicPricingConfig,
    current_booked_count: u32,
) -> i64 {
    if !config.enabled {
        return tier.base_price;
    }

    let occupancy = tier.occupancy_percent(current_booked_count);
    if occupancy >= config.threshold_percentage {
        // base * (1 + pct/100), rounded half-up without touching floats
        (tier.base_price * (100 + config.price_increase_percentage as i64) + 50) / 100
    } else {
        tier.base_price
    }
}
