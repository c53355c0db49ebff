/// Root assembly and whole-campaign properties
use crate::*;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use slidebar_model::CampaignConfig;
use std::collections::BTreeMap;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn options() -> CompileOptions {
    CompileOptions::at(now())
        .with_host_id("bar")
        .with_asset_base_url("https://cdn.example.com/assets")
}

fn campaign(value: Value) -> CampaignConfig {
    serde_json::from_value(value).expect("Failed to build campaign")
}

fn element_parts(node: &VNode) -> (&BTreeMap<String, String>, &BTreeMap<String, String>) {
    match node {
        VNode::Element {
            attributes, styles, ..
        } => (attributes, styles),
        _ => panic!("Expected element node"),
    }
}

/// Walk two trees in lockstep and collect every style key whose value differs
fn differing_style_keys(a: &VNode, b: &VNode, out: &mut Vec<String>) {
    if let (VNode::Element { .. }, VNode::Element { .. }) = (a, b) {
        let (_, styles_a) = element_parts(a);
        let (_, styles_b) = element_parts(b);
        for key in styles_a.keys().chain(styles_b.keys()) {
            if styles_a.get(key) != styles_b.get(key) && !out.contains(key) {
                out.push(key.clone());
            }
        }
        assert_eq!(a.children().len(), b.children().len());
        for (child_a, child_b) in a.children().iter().zip(b.children()) {
            differing_style_keys(child_a, child_b, out);
        }
    }
}

#[test]
fn test_mobile_compile_differs_only_in_overridden_keys() {
    let config = campaign(json!({
        "backgroundColor": "#101010",
        "htmlDesign": [
            { "id": "t", "type": "Text",
              "desktopSetting": { "text": "Hello", "fontSize": 20, "textColor": "#fff", "fontFamily": "Roboto" },
              "mobileSetting": { "fontSize": 14 } },
            { "id": "b", "type": "Button",
              "desktopSetting": { "btnName": "Go", "btnColor": "#000", "btnRadius": 8 },
              "mobileSetting": { "btnRadius": 2 } }
        ]
    }));
    let desktop = compile_slide(&config, 0, false, &options()).expect("Failed to compile desktop");
    let mobile = compile_slide(&config, 0, true, &options()).expect("Failed to compile mobile");

    let mut keys = Vec::new();
    differing_style_keys(&desktop, &mobile, &mut keys);
    keys.sort();
    assert_eq!(keys, vec!["border-radius".to_string(), "font-size".to_string()]);

    let h4 = &mobile.find_by_class("ab-slide-text")[0].children()[0];
    assert_eq!(h4.style_value("font-size"), Some("14px"));
    assert_eq!(h4.style_value("color"), Some("#fff"));
    assert_eq!(h4.style_value("font-family"), Some("'Roboto', sans-serif"));
}

#[test]
fn test_compile_is_idempotent() {
    let config = campaign(json!({
        "backgroundColor": "stars.png",
        "removable": true,
        "htmlDesign": [
            { "id": "t", "type": "Text", "desktopSetting": { "text": "Ends soon" } },
            { "id": "c", "type": "Clock", "desktopSetting": { "timer": "2024-06-02T12:00:00Z" } },
            { "id": "b", "type": "Button", "desktopSetting": { "btnName": "Shop" } }
        ]
    }));
    let first = compile_campaign(&config, &options());
    let second = compile_campaign(&config, &options());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("Failed to serialize"),
        serde_json::to_string(&second).expect("Failed to serialize")
    );
}

#[test]
fn test_entire_mode_wraps_everything_in_one_anchor() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "t", "type": "Text", "desktopSetting": { "text": "Whole bar is a link" } },
            { "id": "b1", "type": "Button", "desktopSetting": { "btnName": "Ignored" } },
            { "id": "e", "type": "Button", "desktopSetting": {
                "btnLink": "/sale", "btnHoverColor": "#f00", "btnHoverTextColor": "#fff",
                "callToActionOption": { "buttonType": "entire" }
            } }
        ]
    }));
    let root = compile_slide(&config, 0, false, &options()).expect("Failed to compile");

    assert_eq!(root.count_tag("a"), 1);
    assert!(root.find_by_class("ab-slide-btn").is_empty());

    let anchor = root.find_all(&|node| node.tag() == Some("a"))[0];
    assert_eq!(anchor.attr("href"), Some("/sale"));
    assert_eq!(anchor.text_content(), "Whole bar is a link");
    assert!(anchor.find_by_class("ab-slide-text").len() == 1);

    let rules: Vec<String> = root.style_rules().iter().map(|rule| rule.css_text(1)).collect();
    assert_eq!(
        rules,
        vec![
            "#bar>.ab-slide:nth-child(1):hover{background:#f00 !important;}".to_string(),
            "#bar>.ab-slide:nth-child(1):hover .ab-slide-text h4{color:#fff !important;}".to_string(),
        ]
    );
}

#[test]
fn test_entire_mode_keeps_composite_submit_button() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "b1", "type": "Button", "desktopSetting": { "btnName": "Ignored" } },
            { "id": "e", "type": "Button", "desktopSetting": {
                "btnLink": "/sale", "callToActionOption": { "buttonType": "entire" }
            } },
            { "id": "eb", "type": "emailBar", "desktopSetting": {}, "childComponent": [
                { "id": "in", "type": "Email", "desktopSetting": {} },
                { "id": "b2", "type": "Button", "dataType": "Contact-Submit", "desktopSetting": { "btnName": "Join" } }
            ] }
        ]
    }));
    let root = compile_slide(&config, 0, false, &options()).expect("Failed to compile");

    // Only the email bar's own button survives
    let buttons = root.find_by_class("ab-slide-btn");
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].attr("data-Type"), Some("Contact-Submit"));
    let email = root.find_by_class("ab-slide-email")[0];
    assert_eq!(email.find_by_class("ab-slide-btn").len(), 1);

    let entire = root.find_by_class("ab-slide-entire");
    assert_eq!(entire.len(), 1);
    assert_eq!(entire[0].attr("href"), Some("/sale"));
}

#[test]
fn test_button_hover_rules_are_numbered_by_sibling_position() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "b1", "type": "Button", "desktopSetting": { "btnName": "One", "btnColor": "#111" } },
            { "id": "b2", "type": "Button", "desktopSetting": { "btnName": "Two", "btnColor": "#222" } },
            { "id": "b3", "type": "Button", "desktopSetting": { "btnName": "Three", "btnColor": "#333" } }
        ]
    }));
    let root = compile_slide(&config, 0, false, &options()).expect("Failed to compile");
    let selectors: Vec<String> = root
        .style_rules()
        .iter()
        .map(|rule| rule.resolved_selector(2))
        .collect();
    assert_eq!(
        selectors,
        vec![
            "#bar>.ab-slide:nth-child(2) .ab-slide-btn:nth-child(1):hover a",
            "#bar>.ab-slide:nth-child(2) .ab-slide-btn:nth-child(2):hover a",
            "#bar>.ab-slide:nth-child(2) .ab-slide-btn:nth-child(3):hover a",
        ]
    );
}

#[test]
fn test_hover_numbering_counts_non_button_siblings() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "t", "type": "Text", "desktopSetting": { "text": "Deal" } },
            { "id": "b1", "type": "Button", "desktopSetting": { "btnName": "One", "btnColor": "#111" } }
        ]
    }));
    let root = compile_slide(&config, 0, false, &options()).expect("Failed to compile");
    assert_eq!(root.style_rules()[0].sibling_index, Some(2));
}

#[test]
fn test_background_normalization_at_root() {
    let config = campaign(json!({
        "backgroundColor": "waves.jpg",
        "mobilebackgroundColor": "linear-gradient(90deg, #000, #fff)",
        "htmlDesign": []
    }));
    let desktop = compile_slide(&config, 0, false, &options()).expect("Failed to compile");
    assert!(desktop.has_class("ab-slide"));
    assert_eq!(
        desktop.style_value("background"),
        Some("url(https://cdn.example.com/assets/background/waves.jpg)")
    );

    match &desktop {
        VNode::Element { mobile_styles, .. } => {
            let mobile = mobile_styles.as_ref().expect("Failed to find mobile styles");
            assert_eq!(
                mobile.get("background").map(String::as_str),
                Some("linear-gradient(90deg, #000, #fff)")
            );
            assert_eq!(mobile.get("padding").map(String::as_str), Some("10px 0"));
        }
        _ => panic!("Expected element node"),
    }
}

#[test]
fn test_removable_campaign_gets_close_icon() {
    let config = campaign(json!({ "removable": true, "htmlDesign": [] }));
    let root = compile_slide(&config, 0, false, &options()).expect("Failed to compile");
    let last = root.children().last().expect("Failed to find last child");
    assert!(last.has_class("ab-slide-remove"));
}

#[test]
fn test_multi_slide_campaign() {
    let config = campaign(json!({
        "animationType": "rotating",
        "slides": [
            { "id": "s1", "backgroundColor": "#111", "htmlDesign": [
                { "id": "t1", "type": "Text", "desktopSetting": { "text": "First" } }
            ] },
            { "id": "s2", "backgroundColor": "#222", "htmlDesign": [
                { "id": "t2", "type": "Text", "desktopSetting": { "text": "Second" } }
            ] }
        ]
    }));
    let slides = compile_campaign(&config, &options());
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[1].desktop.text_content(), "Second");
    assert_eq!(slides[1].desktop.attr("data-slide-id"), Some("s2"));

    let err = compile_slide(&config, 5, false, &options()).unwrap_err();
    assert!(matches!(err, CompileError::SlideOutOfRange { index: 5, count: 2 }));
}

#[test]
fn test_attach_layout_stores_html_layout() {
    let mut config = campaign(json!({
        "htmlDesign": [ { "id": "t", "type": "Text", "desktopSetting": { "text": "Hi" } } ]
    }));
    attach_layout(&mut config, &options()).expect("Failed to attach layout");

    let layout = config.html_layout.as_ref().expect("Failed to find layout");
    assert!(layout.get("desktop").is_some());
    assert!(layout.get("mobile").is_some());

    let compiled: CompiledSlide =
        serde_json::from_value(layout.clone()).expect("Failed to read layout back");
    assert_eq!(compiled.desktop.text_content(), "Hi");
}

#[test]
fn test_static_html_rendering() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "t", "type": "Text", "desktopSetting": { "text": "Free returns" } },
            { "id": "b", "type": "Button", "desktopSetting": { "btnName": "Shop", "btnColor": "#000" } }
        ]
    }));
    let slides = compile_campaign(&config, &options());
    let html = render_host_html(
        "bar",
        &[&slides[0].desktop],
        &RenderOptions {
            pretty: false,
            ..RenderOptions::default()
        },
    );
    assert!(html.starts_with("<div id=\"bar\"><div class=\"ab-slide\""));
    assert!(html.contains("Free returns"));
    assert!(html.contains("<style>#bar>.ab-slide:nth-child(1) .ab-slide-btn:nth-child(2):hover a{"));
}

#[test]
fn test_font_stylesheet_url() {
    let config = campaign(json!({
        "htmlDesign": [
            { "id": "t", "type": "Text", "desktopSetting": { "text": "A", "fontFamily": "Open Sans" },
              "mobileSetting": { "fontFamily": "Lato" } },
            { "id": "s", "type": "freeShippingBar", "desktopSetting": { "fontFamily": "Open Sans" } }
        ]
    }));
    let families = collect_font_families(&config);
    assert_eq!(families, vec!["Open Sans".to_string(), "Lato".to_string()]);
    assert_eq!(
        google_fonts_url(GOOGLE_FONTS_BASE, &families).as_deref(),
        Some("https://fonts.googleapis.com/css?family=Open+Sans|Lato&display=swap")
    );
}
