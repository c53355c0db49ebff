/// Per-block compilation: one campaign per test, inspected through the
/// compiled tree.
use crate::*;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use slidebar_model::CampaignConfig;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn campaign(blocks: Value) -> CampaignConfig {
    serde_json::from_value(json!({
        "id": "test",
        "backgroundColor": "#222222",
        "htmlDesign": blocks,
    }))
    .expect("Failed to build campaign")
}

fn compile(blocks: Value) -> VNode {
    let config = campaign(blocks);
    compile_slide(&config, 0, false, &CompileOptions::at(now())).expect("Failed to compile")
}

#[test]
fn test_text_block_plain() {
    let root = compile(json!([
        { "id": "t1", "type": "Text", "desktopSetting": { "text": "Big <sale>", "fontSize": "18px", "textColor": "#fff" } }
    ]));
    let text = root.find_by_class("ab-slide-text");
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].attr("id"), Some("ab-block-t1"));
    assert!(!text[0].has_class("ql-editor"));

    let h4 = &text[0].children()[0];
    assert_eq!(h4.tag(), Some("h4"));
    assert_eq!(h4.style_value("font-size"), Some("18px"));
    assert_eq!(h4.style_value("color"), Some("#fff"));
    assert!(matches!(&h4.children()[0], VNode::Text { content } if content == "Big <sale>"));
}

#[test]
fn test_text_block_rich() {
    let root = compile(json!([
        { "id": "t1", "type": "Text", "desktopSetting": { "text": "<p><b>Hi</b></p>", "richText": true } }
    ]));
    let text = root.find_by_class("ab-slide-text");
    assert!(text[0].has_class("ql-editor"));
    assert!(matches!(&text[0].children()[0].children()[0], VNode::Markup { .. }));
}

#[test]
fn test_button_block() {
    let root = compile(json!([
        { "id": "b1", "type": "Button", "desktopSetting": {
            "btnName": "Shop", "btnLink": "/collections/all", "btnColor": "#000",
            "btnTextColor": "#fff", "btnHoverColor": "#333", "openNewTab": true
        } }
    ]));
    let buttons = root.find_by_class("ab-slide-btn");
    assert_eq!(buttons.len(), 1);

    let anchor = &buttons[0].children()[0];
    assert_eq!(anchor.tag(), Some("a"));
    assert_eq!(anchor.attr("href"), Some("/collections/all"));
    assert_eq!(anchor.attr("target"), Some("_blank"));
    assert_eq!(anchor.style_value("border-radius"), Some("4px"));

    let rules = buttons[0].style_rules();
    assert_eq!(rules.len(), 1);
    assert_eq!(
        rules[0].properties,
        vec![
            ("background".to_string(), "#333".to_string()),
            ("color".to_string(), "#fff".to_string())
        ]
    );
}

#[test]
fn test_coupon_button_copies_code() {
    let root = compile(json!([
        { "id": "b1", "type": "Button", "desktopSetting": {
            "btnName": "Copy code", "btnLink": "/ignored", "couponCode": "SAVE10",
            "callToActionOption": { "buttonType": "btnCoupon" }
        } }
    ]));
    let button = root.find_by_class("ab-slide-btn")[0];
    assert_eq!(button.attr("copyText"), Some("true"));
    assert_eq!(button.attr("copied-text"), Some("SAVE10"));
    assert_eq!(button.children()[0].attr("href"), Some(VOID_HREF));
    assert!(button.children()[0]
        .style_value("border")
        .map(|border| border.contains("dashed"))
        .unwrap_or(false));
}

#[test]
fn test_link_button_has_no_background() {
    let root = compile(json!([
        { "id": "b1", "type": "Button", "desktopSetting": {
            "btnName": "Details", "btnColor": "#f00",
            "callToActionOption": { "buttonType": "btnLink" }
        } }
    ]));
    let anchor = &root.find_by_class("ab-slide-btn")[0].children()[0];
    assert_eq!(anchor.style_value("background"), Some("transparent"));
    assert_eq!(anchor.style_value("text-decoration"), Some("underline"));
    assert_eq!(anchor.attr("href"), Some(VOID_HREF));
}

#[test]
fn test_clock_initial_digits() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "normal", "timer": "2024-01-01T01:01:01Z"
        } }
    ]));
    let clock = root.find_by_class("ab-clock");
    assert_eq!(clock.len(), 1);

    let list = &clock[0].children()[0];
    assert_eq!(list.tag(), Some("ul"));
    assert_eq!(list.attr("clock-type"), Some("normal"));
    assert_eq!(list.attr("date"), Some("2024-01-01T01:01:01Z"));
    assert_eq!(list.attr("removeTimer"), Some("false"));
    assert_eq!(list.children().len(), 5);

    let digits: Vec<String> = clock[0]
        .find_by_class("ab-clock-num")
        .iter()
        .map(|node| node.text_content())
        .collect();
    assert_eq!(digits, vec!["00", "01", "01", "01"]);
    assert_eq!(clock[0].find_by_class("ab-clock-sep").len(), 3);
    assert_eq!(clock[0].find_by_class("ab-clock-label")[0].text_content(), "Days");
}

#[test]
fn test_expired_clock_with_remove_timer_is_omitted() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "normal", "timer": "2023-12-31T23:59:59Z", "removeTimer": true
        } }
    ]));
    assert!(root.find_by_class("ab-clock").is_empty());
}

#[test]
fn test_expired_clock_without_remove_timer_shows_zero() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "normal", "timer": "2023-12-31T23:59:59Z"
        } }
    ]));
    let digits: Vec<String> = root
        .find_by_class("ab-clock-num")
        .iter()
        .map(|node| node.text_content())
        .collect();
    assert_eq!(digits, vec!["00", "00", "00", "00"]);
}

#[test]
fn test_repeated_clock_attributes() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "repeated",
            "repeatedTimer": { "repeatedHours": 24, "repeatTimerCreateDate": "2023-12-31T12:00:00Z" }
        } }
    ]));
    let list = &root.find_by_class("ab-clock")[0].children()[0];
    assert_eq!(list.attr("repeatedHours"), Some("24"));
    assert_eq!(list.attr("repeatTimerCreateDate"), Some("2023-12-31T12:00:00Z"));
    assert_eq!(list.attr("date"), None);

    // 12h elapsed of a 24h cycle
    let hours = root.find_by_class("ab-clock-hours")[0].text_content();
    assert!(hours.starts_with("12"));
}

#[test]
fn test_repeated_clock_keeps_fractional_interval() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "repeated",
            "repeatedTimer": { "repeatedHours": 0.125, "repeatTimerCreateDate": "2024-01-01T00:00:00Z" }
        } }
    ]));
    let list = &root.find_by_class("ab-clock")[0].children()[0];
    assert_eq!(list.attr("repeatedHours"), Some("0.125"));

    // A full 7m30s cycle starts right at creation
    let minutes = root.find_by_class("ab-clock-minutes")[0].text_content();
    let seconds = root.find_by_class("ab-clock-seconds")[0].text_content();
    assert!(minutes.starts_with("07"));
    assert!(seconds.starts_with("30"));
}

#[test]
fn test_repeated_clock_past_end_is_omitted() {
    let root = compile(json!([
        { "id": "c1", "type": "Clock", "desktopSetting": {
            "timerType": "repeated",
            "repeatedTimer": {
                "repeatedHours": 1,
                "repeatTimerCreateDate": "2023-12-01T00:00:00Z",
                "repeatedTimeEnd": "2023-12-15T00:00:00Z"
            }
        } }
    ]));
    assert!(root.find_by_class("ab-clock").is_empty());
}

#[test]
fn test_shipping_bar_carries_attributes() {
    let root = compile(json!([
        { "id": "s1", "type": "freeShippingBar", "desktopSetting": {
            "progressStartMsg": "Only", "progressEndMsg": "to go", "goalMsg": "Free shipping!",
            "shippingPrice": 50, "currency": "€", "currencyPosition": "after"
        } }
    ]));
    let progress = root.find_by_class("ab-shipping-progress")[0];
    assert_eq!(progress.attr("progress-start-msg"), Some("Only"));
    assert_eq!(progress.attr("price-data"), Some("50"));
    assert_eq!(progress.attr("currency"), Some("€"));
    assert_eq!(progress.attr("position"), Some("after"));
    assert_eq!(progress.attr("progress-end-msg"), Some("to go"));
    assert_eq!(progress.text_content(), "Only 50€ to go");

    let goal = root.find_by_class("ab-shipping-goal")[0];
    assert_eq!(goal.attr("gole-msg"), Some("Free shipping!"));
    assert_eq!(goal.style_value("display"), Some("none"));
}

#[test]
fn test_shipping_goal_preview() {
    let config = campaign(json!([
        { "id": "s1", "type": "freeShippingBar", "desktopSetting": { "shippingPrice": 100 } }
    ]));
    let options = CompileOptions::at(now()).with_preview(PreviewTarget::from_selector(Some("goalMessage")));
    let root = compile_slide(&config, 0, false, &options).expect("Failed to compile");

    assert_eq!(root.find_by_class("ab-shipping-progress")[0].style_value("display"), Some("none"));
    assert_eq!(root.find_by_class("ab-shipping-goal")[0].style_value("display"), None);
}

#[test]
fn test_product_blocks_respect_flags() {
    let root = compile(json!([
        { "id": "p1", "type": "productTitle", "desktopSetting": {
            "productTitle": "Mug", "productPrice": "$12", "showImage": false
        } },
        { "id": "v1", "type": "variant", "desktopSetting": { "showVariant": false } },
        { "id": "q1", "type": "quantity", "desktopSetting": { "defaultQuantity": 0 } }
    ]));
    let product = root.find_by_class("ab-product")[0];
    assert!(product.find_by_class("ab-product-image").is_empty());
    assert_eq!(product.find_by_class("ab-product-title")[0].text_content(), "Mug");
    assert_eq!(product.find_by_class("ab-product-price")[0].text_content(), "$12");

    assert!(root.find_by_class("ab-variant").is_empty());

    let input = root.find_by_class("ab-qty-input")[0];
    assert_eq!(input.attr("value"), Some("1"));
}

#[test]
fn test_variant_selection() {
    let root = compile(json!([
        { "id": "v1", "type": "variant", "desktopSetting": {
            "variants": [ { "id": "a", "title": "Small" }, { "id": "b", "title": "Large" } ],
            "selectedVariant": "b"
        } }
    ]));
    let options = root.find_all(&|node| node.tag() == Some("option"));
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].attr("selected"), None);
    assert_eq!(options[1].attr("selected"), Some("selected"));
}

#[test]
fn test_cart_bar_flattens_four_children() {
    let root = compile(json!([
        { "id": "cart", "type": "cartBar", "desktopSetting": {}, "childComponent": [
            { "id": "p", "type": "productTitle", "desktopSetting": {
                "showImage": true, "showTitle": true, "showPrice": true,
                "productImage": "https://cdn.example.com/mug.png", "productTitle": "Mug", "productPrice": "$12"
            } },
            { "id": "v", "type": "variant", "desktopSetting": {
                "showVariant": true, "variants": [ { "id": "1", "title": "Default" } ]
            } },
            { "id": "q", "type": "quantity", "desktopSetting": { "showQuantity": true } },
            { "id": "b", "type": "Button", "dataType": "Add-To-Cart", "desktopSetting": { "btnName": "Add to cart" } }
        ] }
    ]));
    let cart = root.find_by_class("ab-slide-cart");
    assert_eq!(cart.len(), 1);

    let children = cart[0].children();
    assert_eq!(children.len(), 4);
    assert!(children[0].has_class("ab-product"));
    assert!(children[1].has_class("ab-variant"));
    assert!(children[2].has_class("Quantity"));
    assert!(children[3].has_class("ab-slide-btn"));
    assert_eq!(children[3].attr("data-Type"), Some("Add-To-Cart"));
    assert_eq!(children[3].children()[0].attr("href"), Some(VOID_HREF));

    // Hover rule targets the button's position inside the cart bar, even
    // with no colours configured
    let rules = children[3].style_rules();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].sibling_index, Some(4));
    assert_eq!(
        rules[0].properties,
        vec![("color".to_string(), DEFAULT_HOVER_COLOR.to_string())]
    );
}

#[test]
fn test_email_bar_routes_text_to_success_view() {
    let root = compile(json!([
        { "id": "eb", "type": "emailBar", "desktopSetting": {}, "childComponent": [
            { "id": "e", "type": "Email", "desktopSetting": { "placeholder": "you@shop.com" } },
            { "id": "b", "type": "Button", "dataType": "Contact-Submit", "desktopSetting": { "btnName": "Join" } },
            { "id": "t", "type": "Text", "desktopSetting": { "text": "Thanks for subscribing" } }
        ] }
    ]));
    let email = root.find_by_class("ab-slide-email")[0];
    assert_eq!(email.children().len(), 2);
    assert!(email.children()[0].has_class("ab-slide-email-input"));
    assert_eq!(email.children()[1].attr("data-Type"), Some("Contact-Submit"));

    let success = root.find_by_class("email-success");
    assert_eq!(success.len(), 1);
    assert!(success[0].has_class("ab-slide-content"));
    assert_eq!(success[0].style_value("display"), Some("none"));
    assert_eq!(success[0].text_content(), "Thanks for subscribing");

    let input = root.find_all(&|node| node.tag() == Some("input"))[0];
    assert_eq!(input.attr("placeholder"), Some("you@shop.com"));
    assert_eq!(input.attr("required"), Some("required"));
}

#[test]
fn test_unknown_kind_is_skipped() {
    let root = compile(json!([
        { "id": "x", "type": "hologram", "desktopSetting": { "beam": true } },
        { "id": "t", "type": "Text", "desktopSetting": { "text": "Still here" } }
    ]));
    let content = root.find_by_class("active")[0];
    assert_eq!(content.children().len(), 1);
    assert_eq!(content.text_content(), "Still here");
}

#[test]
fn test_malformed_setting_falls_back_to_defaults() {
    let root = compile(json!([
        { "id": "t", "type": "Text", "desktopSetting": { "text": 42, "fontSize": "big" } }
    ]));
    let h4 = &root.find_by_class("ab-slide-text")[0].children()[0];
    assert_eq!(h4.style_value("font-size"), Some("16px"));
}
