//! Live widget tests driven through a mounted engine
//!
//! Countdown ticking, shipping progress, coupon copy, quantity steppers and
//! the email and add-to-cart forms.

use chrono::{TimeZone, Utc};
use serde_json::json;
use slidebar_model::CampaignConfig;
use slidebar_runtime::widgets::shipping;
use slidebar_runtime::{
    EngineConfig, Environment, MountOptions, NodeId, Page, SlideEngine, SlideEvent, StaticCart,
};

fn page() -> Page {
    Page::new(1280.0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn campaign(blocks: serde_json::Value) -> CampaignConfig {
    serde_json::from_value(json!({ "id": "widgets", "htmlDesign": blocks }))
        .expect("Failed to build campaign")
}

fn mounted(page: &mut Page, blocks: serde_json::Value) -> SlideEngine {
    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(page, &campaign(blocks), MountOptions::default())
        .expect("Failed to mount");
    engine
}

fn first_by_class(page: &Page, engine: &SlideEngine, class: &str) -> NodeId {
    let host = engine.host().expect("Failed to get host");
    page.document
        .find_by_class(host, class)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("Failed to find .{}", class))
}

fn digits(page: &Page, engine: &SlideEngine) -> Vec<String> {
    let host = engine.host().expect("Failed to get host");
    page.document
        .find_by_class(host, "ab-clock-num")
        .into_iter()
        .map(|node| page.document.text_content(node))
        .collect()
}

#[test]
fn test_countdown_ticks_every_second() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([{ "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "normal", "timer": "2024-01-01T01:01:01Z"
        } }]),
    );
    assert_eq!(engine.countdowns(), 1);
    assert_eq!(digits(&page, &engine), vec!["00", "01", "01", "01"]);

    page.run(1000, &mut [&mut engine]);
    assert_eq!(digits(&page, &engine), vec!["00", "01", "01", "00"]);

    page.run(2000, &mut [&mut engine]);
    assert_eq!(digits(&page, &engine), vec!["00", "01", "00", "58"]);
}

#[test]
fn test_countdown_removes_itself_when_configured() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([
            { "id": "c1", "type": "Clock", "desktopSetting": {
                "timerType": "normal", "timer": "2024-01-01T00:00:03Z", "removeTimer": true
            } },
            { "id": "t1", "type": "Text", "desktopSetting": { "text": "Hurry" } }
        ]),
    );
    let clock = first_by_class(&page, &engine, "ab-clock");

    page.run(2000, &mut [&mut engine]);
    assert!(page.document.is_connected(clock));

    page.run(1000, &mut [&mut engine]);
    assert!(!page.document.is_connected(clock));
    assert_eq!(engine.countdowns(), 0);
    assert_eq!(page.scheduler.pending_for(engine.owner()), 0);
    // The rest of the slide stays
    assert!(engine.is_mounted());
}

#[test]
fn test_expired_countdown_stays_at_zero() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([{ "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "normal", "timer": "2024-01-01T00:00:02Z"
        } }]),
    );

    page.run(5000, &mut [&mut engine]);
    assert_eq!(digits(&page, &engine), vec!["00", "00", "00", "00"]);
    assert_eq!(engine.countdowns(), 0);
    assert_eq!(page.scheduler.pending_for(engine.owner()), 0);
}

#[test]
fn test_repeated_countdown_ticks_on_compiled_interval() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([{ "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "repeated",
            "repeatedTimer": { "repeatedHours": 0.125, "repeatTimerCreateDate": "2024-01-01T00:00:00Z" }
        } }]),
    );
    assert_eq!(digits(&page, &engine), vec!["00", "00", "07", "30"]);

    page.run(1000, &mut [&mut engine]);
    assert_eq!(digits(&page, &engine), vec!["00", "00", "07", "29"]);
}

fn shipping_blocks() -> serde_json::Value {
    json!([{ "id": "s1", "type": "freeShippingBar", "desktopSetting": {
        "progressStartMsg": "Spend", "progressEndMsg": "more for free shipping",
        "goalMsg": "You got free shipping!", "shippingPrice": 100, "currency": "$"
    } }])
}

#[test]
fn test_shipping_goal_reached_at_threshold() {
    let mut page = page();
    let mut engine = SlideEngine::new(EngineConfig::default()).with_cart(StaticCart::new(10000));
    engine
        .mount(&mut page, &campaign(shipping_blocks()), MountOptions::default())
        .expect("Failed to mount");

    let bar = engine.shipping_bars()[0];
    assert!(shipping::goal_visible(&page.document, bar));
    let goal = first_by_class(&page, &engine, "ab-shipping-goal");
    assert_eq!(page.document.text_content(goal), "You got free shipping!");
}

#[test]
fn test_shipping_shows_remaining_below_threshold() {
    let mut page = page();
    let mut engine = SlideEngine::new(EngineConfig::default()).with_cart(StaticCart::new(9950));
    engine
        .mount(&mut page, &campaign(shipping_blocks()), MountOptions::default())
        .expect("Failed to mount");

    let bar = engine.shipping_bars()[0];
    assert!(!shipping::goal_visible(&page.document, bar));
    let price = first_by_class(&page, &engine, "ab-shipping-price");
    assert_eq!(page.document.text_content(price), "$0.50");
}

#[test]
fn test_shipping_cart_skipped_outside_production() {
    let mut page = page();
    let config = EngineConfig::default().with_environment(Environment::Development);
    let mut engine = SlideEngine::new(config).with_cart(StaticCart::new(10000));
    engine
        .mount(&mut page, &campaign(shipping_blocks()), MountOptions::default())
        .expect("Failed to mount");

    let bar = engine.shipping_bars()[0];
    assert!(!shipping::goal_visible(&page.document, bar));

    // A total pushed by the host still applies
    assert_eq!(engine.apply_cart_total(&mut page, 12000), 1);
    assert!(shipping::goal_visible(&page.document, bar));
}

#[test]
fn test_cart_total_skips_detached_bars() {
    let mut page = page();
    let config = EngineConfig::default().with_environment(Environment::Development);
    let mut engine = SlideEngine::new(config);
    let blocks = json!([
        { "id": "s1", "type": "freeShippingBar", "desktopSetting": { "shippingPrice": 100, "goalMsg": "Free!" } },
        { "id": "s2", "type": "freeShippingBar", "desktopSetting": { "shippingPrice": 200, "goalMsg": "Free!" } }
    ]);
    engine
        .mount(&mut page, &campaign(blocks), MountOptions::default())
        .expect("Failed to mount");

    let bars = engine.shipping_bars().to_vec();
    assert_eq!(bars.len(), 2);
    page.document.remove(bars[1]);

    assert_eq!(engine.apply_cart_total(&mut page, 15000), 1);
    assert!(shipping::goal_visible(&page.document, bars[0]));
}

#[test]
fn test_coupon_copy_shows_and_clears_toast() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([{ "id": "b1", "type": "Button", "desktopSetting": {
            "btnName": "Copy code", "couponCode": "SAVE10",
            "callToActionOption": { "buttonType": "btnCoupon" }
        } }]),
    );
    let host = engine.host().expect("Failed to get host");
    let anchor = page.document.query_selector(host, "a").expect("Failed to find anchor");

    assert!(engine.click(&mut page, anchor));
    assert_eq!(page.clipboard.contents(), Some("SAVE10"));
    assert_eq!(
        engine.take_events(),
        vec![SlideEvent::Copied {
            text: "SAVE10".to_string()
        }]
    );

    let root = page.document.root();
    let toast = page.document.find_by_class(root, "ab-notification")[0];
    assert_eq!(page.scheduler.pending_for(engine.owner()), 2);

    page.run(2000, &mut [&mut engine]);
    assert_eq!(page.document.style(toast, "opacity"), Some("0"));

    page.run(300, &mut [&mut engine]);
    assert!(!page.document.is_connected(toast));
    assert_eq!(page.scheduler.pending_for(engine.owner()), 0);
}

#[test]
fn test_unmount_removes_pending_toast() {
    let mut page = page();
    let mut engine = mounted(
        &mut page,
        json!([{ "id": "b1", "type": "Button", "desktopSetting": {
            "btnName": "Copy code", "couponCode": "SAVE10",
            "callToActionOption": { "buttonType": "btnCoupon" }
        } }]),
    );
    let wrapper = first_by_class(&page, &engine, "ab-slide-btn");
    engine.click(&mut page, wrapper);
    let root = page.document.root();
    let toast = page.document.find_by_class(root, "ab-notification")[0];

    engine.unmount(&mut page);
    assert!(!page.document.is_connected(toast));
    assert_eq!(page.scheduler.pending(), 0);
}

fn cart_blocks() -> serde_json::Value {
    json!([{ "id": "cart", "type": "cartBar", "desktopSetting": {}, "childComponent": [
        { "id": "v", "type": "variant", "desktopSetting": {
            "showVariant": true,
            "variants": [ { "id": "101", "title": "Small" }, { "id": "102", "title": "Large" } ]
        } },
        { "id": "q", "type": "quantity", "desktopSetting": { "showQuantity": true, "defaultQuantity": 1 } },
        { "id": "b", "type": "Button", "dataType": "Add-To-Cart", "desktopSetting": { "btnName": "Add to cart" } }
    ] }])
}

#[test]
fn test_quantity_stepper_floors_at_one() {
    let mut page = page();
    let mut engine = mounted(&mut page, cart_blocks());
    let minus = first_by_class(&page, &engine, "ab-qty-minus");
    let plus = first_by_class(&page, &engine, "ab-qty-plus");
    let input = first_by_class(&page, &engine, "ab-qty-input");

    engine.click(&mut page, minus);
    assert_eq!(page.document.attr(input, "value"), Some("1"));

    engine.click(&mut page, plus);
    engine.click(&mut page, plus);
    assert_eq!(page.document.attr(input, "value"), Some("3"));
}

#[test]
fn test_add_to_cart_reports_variant_and_quantity() {
    let mut page = page();
    let mut engine = mounted(&mut page, cart_blocks());
    let plus = first_by_class(&page, &engine, "ab-qty-plus");
    engine.click(&mut page, plus);

    let button = first_by_class(&page, &engine, "ab-slide-btn");
    assert!(engine.click(&mut page, button));
    assert_eq!(
        engine.take_events(),
        vec![SlideEvent::AddToCart {
            variant: Some("101".to_string()),
            quantity: 2
        }]
    );
}

fn email_blocks() -> serde_json::Value {
    json!([{ "id": "eb", "type": "emailBar", "desktopSetting": {}, "childComponent": [
        { "id": "e", "type": "Email", "desktopSetting": { "placeholder": "you@shop.com" } },
        { "id": "b", "type": "Button", "dataType": "Contact-Submit", "desktopSetting": { "btnName": "Join" } },
        { "id": "t", "type": "Text", "desktopSetting": { "text": "Thanks for subscribing" } }
    ] }])
}

#[test]
fn test_email_submit_switches_to_success() {
    let mut page = page();
    let mut engine = mounted(&mut page, email_blocks());
    let host = engine.host().expect("Failed to get host");
    let input = page
        .document
        .query_selector(host, "input[type=email]")
        .expect("Failed to find input");
    page.document.set_attr(input, "value", "shopper@example.com");

    let button = first_by_class(&page, &engine, "ab-slide-btn");
    assert!(engine.click(&mut page, button));
    assert_eq!(
        engine.take_events(),
        vec![SlideEvent::Submit {
            email: "shopper@example.com".to_string()
        }]
    );

    let success = first_by_class(&page, &engine, "email-success");
    assert!(page.document.has_class(success, "active"));
    assert_eq!(page.document.style(success, "display"), None);
    for content in page.document.find_by_class(host, "ab-slide-content") {
        if content != success {
            assert_eq!(page.document.style(content, "display"), Some("none"));
        }
    }
}

#[test]
fn test_email_submit_requires_address() {
    let mut page = page();
    let mut engine = mounted(&mut page, email_blocks());
    let button = first_by_class(&page, &engine, "ab-slide-btn");

    engine.click(&mut page, button);
    assert!(engine.take_events().is_empty());
    let success = first_by_class(&page, &engine, "email-success");
    assert_eq!(page.document.style(success, "display"), Some("none"));
}
