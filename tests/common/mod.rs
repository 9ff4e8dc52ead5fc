#![allow(dead_code)]

use dealflow::application::engine::{Actor, DealEngine};
use dealflow::domain::deal::DealRequest;
use dealflow::domain::pricing::{
    BarterOffer, ContentRequirements, FixedPricing, NegotiationOffer, OfferAmount,
    PackageSelection, PricingSelection,
};
use dealflow::infrastructure::in_memory::InMemoryDealStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const BRAND: &str = "brand-acme";
pub const INFLUENCER: &str = "influencer-maya";

pub fn brand() -> Actor {
    Actor::brand(BRAND)
}

pub fn influencer() -> Actor {
    Actor::influencer(INFLUENCER)
}

pub fn engine() -> DealEngine {
    DealEngine::new(Box::new(InMemoryDealStore::new()))
}

pub fn reels(count: u8) -> ContentRequirements {
    ContentRequirements {
        reels: count,
        ..Default::default()
    }
}

/// Two reels at 1000 each.
pub fn fixed_request() -> DealRequest {
    fixed_request_with(reels(2), dec!(1000))
}

pub fn fixed_request_with(requirements: ContentRequirements, reel_price: Decimal) -> DealRequest {
    DealRequest {
        influencer_id: INFLUENCER.to_string(),
        description: "Summer collection launch".to_string(),
        content_requirements: requirements,
        pricing: PricingSelection {
            fixed_pricing: Some(FixedPricing {
                reel_price: Some(reel_price),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

pub fn negotiation_request(amount: Decimal) -> DealRequest {
    DealRequest {
        influencer_id: INFLUENCER.to_string(),
        description: String::new(),
        content_requirements: reels(1),
        pricing: PricingSelection {
            negotiation: Some(NegotiationOffer {
                offer_amount: OfferAmount::new(amount).unwrap(),
            }),
            ..Default::default()
        },
    }
}

pub fn package_request(total: Decimal) -> DealRequest {
    DealRequest {
        influencer_id: INFLUENCER.to_string(),
        description: String::new(),
        content_requirements: ContentRequirements::default(),
        pricing: PricingSelection {
            package_deal: Some(PackageSelection {
                name: "Creator bundle".to_string(),
                total_price: total,
            }),
            ..Default::default()
        },
    }
}

pub fn barter_request(product: &str, price: Decimal) -> DealRequest {
    DealRequest {
        influencer_id: INFLUENCER.to_string(),
        description: String::new(),
        content_requirements: ContentRequirements::default(),
        pricing: PricingSelection {
            barter: Some(BarterOffer {
                product_name: product.to_string(),
                product_price: OfferAmount::new(price).unwrap(),
            }),
            ..Default::default()
        },
    }
}
