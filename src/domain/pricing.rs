use crate::error::{DealError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound on how many pieces of a single content type a deal may request.
pub const MAX_CONTENT_PER_TYPE: u8 = 9;

/// A brand or influencer supplied price, bounded to `[1, 99999]`.
///
/// Used for negotiation offers, barter product values and counter-offers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct OfferAmount(Decimal);

impl OfferAmount {
    pub const MIN: Decimal = Decimal::ONE;
    pub const MAX: Decimal = Decimal::from_parts(99999, 0, 0, false, 0);

    pub fn new(value: Decimal) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DealError::validation(format!(
                "Amount must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for OfferAmount {
    type Error = DealError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for OfferAmount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl From<OfferAmount> for Decimal {
    fn from(amount: OfferAmount) -> Self {
        amount.0
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Reel,
    Post,
    Story,
    Live,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Reel => "reel",
            ContentType::Post => "post",
            ContentType::Story => "story",
            ContentType::Live => "live",
        }
    }
}

/// How many pieces of each content type the brand is asking for.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(default)]
pub struct ContentRequirements {
    pub reels: u8,
    pub posts: u8,
    pub stories: u8,
    pub lives: u8,
}

impl ContentRequirements {
    pub fn count(&self, content_type: ContentType) -> u8 {
        match content_type {
            ContentType::Reel => self.reels,
            ContentType::Post => self.posts,
            ContentType::Story => self.stories,
            ContentType::Live => self.lives,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reels == 0 && self.posts == 0 && self.stories == 0 && self.lives == 0
    }

    pub fn validate(&self) -> Result<()> {
        for content_type in [
            ContentType::Reel,
            ContentType::Post,
            ContentType::Story,
            ContentType::Live,
        ] {
            let count = self.count(content_type);
            if count > MAX_CONTENT_PER_TYPE {
                return Err(DealError::validation(format!(
                    "At most {} {} items can be requested, got {}",
                    MAX_CONTENT_PER_TYPE,
                    content_type.as_str(),
                    count
                )));
            }
        }
        Ok(())
    }
}

/// Per-content prices taken from the influencer's profile.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedPricing {
    pub reel_price: Option<Decimal>,
    pub post_price: Option<Decimal>,
    pub story_price: Option<Decimal>,
    pub live_price: Option<Decimal>,
}

impl FixedPricing {
    pub fn price(&self, content_type: ContentType) -> Option<Decimal> {
        match content_type {
            ContentType::Reel => self.reel_price,
            ContentType::Post => self.post_price,
            ContentType::Story => self.story_price,
            ContentType::Live => self.live_price,
        }
    }

    /// Sums `count × price` over every content type. Types with no count or no
    /// price contribute nothing.
    pub fn total(&self, requirements: &ContentRequirements) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for content_type in [
            ContentType::Reel,
            ContentType::Post,
            ContentType::Story,
            ContentType::Live,
        ] {
            let Some(price) = self.price(content_type) else {
                continue;
            };
            if price < Decimal::ZERO {
                return Err(DealError::validation(format!(
                    "The {} price cannot be negative, got {}",
                    content_type.as_str(),
                    price
                )));
            }
            total = price
                .checked_mul(Decimal::from(requirements.count(content_type)))
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(|| DealError::validation("Fixed pricing total is out of range"))?;
        }
        Ok(total)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PackageSelection {
    pub name: String,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationOffer {
    pub offer_amount: OfferAmount,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BarterOffer {
    pub product_name: String,
    pub product_price: OfferAmount,
}

/// The pricing options a connect request may carry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSelection {
    pub fixed_pricing: Option<FixedPricing>,
    pub package_deal: Option<PackageSelection>,
    pub negotiation: Option<NegotiationOffer>,
    pub barter: Option<BarterOffer>,
}

/// The single pricing strategy a deal was priced with.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(
    tag = "mode",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum PricingStrategy {
    Fixed(FixedPricing),
    Package { name: String, total_price: Decimal },
    Negotiation { offer_amount: OfferAmount },
    Barter {
        product_name: String,
        product_price: OfferAmount,
    },
}

impl PricingStrategy {
    pub fn mode(&self) -> &'static str {
        match self {
            PricingStrategy::Fixed(_) => "fixed",
            PricingStrategy::Package { .. } => "package",
            PricingStrategy::Negotiation { .. } => "negotiation",
            PricingStrategy::Barter { .. } => "barter",
        }
    }
}

/// Resolves the active pricing strategy and the deal total.
///
/// Selections are checked in the order negotiation, package, barter, fixed; the
/// first one present wins and the others are ignored.
pub fn calculate_total_amount(
    selection: &PricingSelection,
    requirements: &ContentRequirements,
) -> Result<(PricingStrategy, Decimal)> {
    if let Some(negotiation) = selection.negotiation {
        let total = negotiation.offer_amount.value();
        return Ok((
            PricingStrategy::Negotiation {
                offer_amount: negotiation.offer_amount,
            },
            total,
        ));
    }

    if let Some(package) = &selection.package_deal {
        if package.total_price <= Decimal::ZERO {
            return Err(DealError::validation("Package price must be positive"));
        }
        return Ok((
            PricingStrategy::Package {
                name: package.name.clone(),
                total_price: package.total_price,
            },
            package.total_price,
        ));
    }

    if let Some(barter) = &selection.barter {
        let product_name = barter.product_name.trim();
        if product_name.is_empty() {
            return Err(DealError::validation("Product name is required for barter deals"));
        }
        return Ok((
            PricingStrategy::Barter {
                product_name: product_name.to_string(),
                product_price: barter.product_price,
            },
            barter.product_price.value(),
        ));
    }

    if let Some(fixed) = &selection.fixed_pricing {
        if requirements.is_empty() {
            return Err(DealError::validation(
                "Select at least one content item for fixed pricing",
            ));
        }
        let total = fixed.total(requirements)?;
        if total <= Decimal::ZERO {
            return Err(DealError::validation(
                "The influencer has no price for the selected content",
            ));
        }
        return Ok((PricingStrategy::Fixed(fixed.clone()), total));
    }

    Err(DealError::validation("A pricing option must be selected"))
}
