mod common;

use common::{
    barter_request, brand, engine, fixed_request_with, influencer, negotiation_request,
    package_request, reels,
};
use dealflow::domain::deal::DealStatus;
use dealflow::domain::pricing::{
    ContentRequirements, FixedPricing, OfferAmount, PricingSelection, calculate_total_amount,
};
use dealflow::error::DealError;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_counter_offer_boundaries() {
    for invalid in [dec!(0), dec!(100000), dec!(-5)] {
        assert!(matches!(
            OfferAmount::new(invalid),
            Err(DealError::ValidationError(_))
        ));
    }

    for valid in [dec!(1), dec!(99999)] {
        let engine = engine();
        let deal = engine.create_deal(&brand(), fixed_request_with(reels(1), dec!(10))).await.unwrap();
        let amount = OfferAmount::new(valid).unwrap();
        let countered = engine
            .counter_offer(&influencer(), deal.id, amount)
            .await
            .unwrap();
        assert_eq!(countered.status, DealStatus::CounterOffered);
        assert_eq!(countered.counter_offer(), Some(valid));
    }
}

#[tokio::test]
async fn test_each_mode_prices_the_deal() {
    let engine = engine();

    let fixed = engine
        .create_deal(&brand(), fixed_request_with(reels(3), dec!(250)))
        .await
        .unwrap();
    assert_eq!(fixed.total_amount, dec!(750));
    assert_eq!(fixed.pricing.mode(), "fixed");

    let package = engine
        .create_deal(&brand(), package_request(dec!(4200)))
        .await
        .unwrap();
    assert_eq!(package.total_amount, dec!(4200));

    let negotiated = engine
        .create_deal(&brand(), negotiation_request(dec!(99999)))
        .await
        .unwrap();
    assert_eq!(negotiated.total_amount, dec!(99999));

    let barter = engine
        .create_deal(&brand(), barter_request("Smart watch", dec!(349)))
        .await
        .unwrap();
    assert_eq!(barter.total_amount, dec!(349));
    assert_eq!(barter.product_name(), Some("Smart watch"));
}

#[tokio::test]
async fn test_invalid_requests_are_not_stored() {
    let engine = engine();

    let too_many = ContentRequirements {
        posts: 10,
        ..Default::default()
    };
    let result = engine
        .create_deal(&brand(), fixed_request_with(too_many, dec!(100)))
        .await;
    assert!(matches!(result, Err(DealError::ValidationError(_))));

    let result = engine
        .create_deal(&brand(), package_request(Decimal::ZERO))
        .await;
    assert!(matches!(result, Err(DealError::ValidationError(_))));

    assert!(engine.list_deals(&brand(), None).await.unwrap().is_empty());
}

#[test]
fn test_reel_count_change_adds_exactly_reel_price() {
    let selection = PricingSelection {
        fixed_pricing: Some(FixedPricing {
            reel_price: Some(dec!(500)),
            post_price: Some(dec!(200)),
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut requirements = ContentRequirements {
        posts: 1,
        ..Default::default()
    };

    let (_, before) = calculate_total_amount(&selection, &requirements).unwrap();
    requirements.reels = 2;
    let (_, after) = calculate_total_amount(&selection, &requirements).unwrap();
    assert_eq!(after - before, dec!(1000));
}

#[test]
fn test_fixed_pricing_is_deterministic() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let requirements = ContentRequirements {
            reels: rng.gen_range(0..=9),
            posts: rng.gen_range(0..=9),
            stories: rng.gen_range(0..=9),
            lives: rng.gen_range(1..=9),
        };
        let price = |rng: &mut rand::rngs::ThreadRng| Decimal::from(rng.gen_range(1..=5000u32));
        let pricing = FixedPricing {
            reel_price: Some(price(&mut rng)),
            post_price: Some(price(&mut rng)),
            story_price: Some(price(&mut rng)),
            live_price: Some(price(&mut rng)),
        };
        let selection = PricingSelection {
            fixed_pricing: Some(pricing.clone()),
            ..Default::default()
        };

        let expected = pricing.reel_price.unwrap() * Decimal::from(requirements.reels)
            + pricing.post_price.unwrap() * Decimal::from(requirements.posts)
            + pricing.story_price.unwrap() * Decimal::from(requirements.stories)
            + pricing.live_price.unwrap() * Decimal::from(requirements.lives);

        let (_, first) = calculate_total_amount(&selection, &requirements).unwrap();
        let (_, second) = calculate_total_amount(&selection, &requirements).unwrap();
        assert_eq!(first, expected);
        assert_eq!(first, second);
    }
}
