//! Host placement and editor preview tests

use chrono::{TimeZone, Utc};
use serde_json::json;
use slidebar_model::CampaignConfig;
use slidebar_runtime::widgets::shipping;
use slidebar_runtime::{
    DuplicatePreview, EngineConfig, MountOptions, MultiplePreview, NodeId, Page, Preview,
    SlideEngine,
};

fn page() -> Page {
    Page::new(1280.0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn campaign(extra: serde_json::Value) -> CampaignConfig {
    let mut value = json!({
        "slides": [
            { "htmlDesign": [ { "id": "t1", "type": "Text", "desktopSetting": { "text": "Sale ends soon" } } ] },
            { "htmlDesign": [ { "id": "t2", "type": "Text", "desktopSetting": { "text": "Free returns" } } ] }
        ]
    });
    if let (Some(target), Some(fields)) = (value.as_object_mut(), extra.as_object()) {
        for (key, field) in fields {
            target.insert(key.clone(), field.clone());
        }
    }
    serde_json::from_value(value).expect("Failed to build campaign")
}

fn element(page: &mut Page, parent: NodeId, tag: &str) -> NodeId {
    let node = page.document.create_element(tag);
    page.document.append_child(parent, node);
    node
}

#[test]
fn test_static_bar_sized_to_tallest_slide() {
    let mut page = page();
    let body = page.document.body();
    let content = element(&mut page, body, "main");

    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(&mut page, &campaign(json!({})), MountOptions::default())
        .expect("Failed to mount");

    let host = engine.host().expect("Failed to get host");
    assert_eq!(page.document.children(body)[0], host);
    assert_eq!(page.document.children(body)[1], content);

    let height = engine.slide_height().expect("Failed to measure");
    assert!(height > 0.0);
    assert_eq!(page.document.style(host, "height"), Some(format!("{}px", height).as_str()));
}

#[test]
fn test_measurement_probe_is_removed() {
    let mut page = page();
    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(&mut page, &campaign(json!({})), MountOptions::default())
        .expect("Failed to mount");

    let body = page.document.body();
    assert_eq!(page.document.element_children(body).len(), 1);
}

#[test]
fn test_fixed_bar_offsets_headers_until_unmount() {
    let mut page = page();
    let body = page.document.body();
    let header = element(&mut page, body, "header");
    page.document.set_style(header, "position", "fixed");

    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(&mut page, &campaign(json!({ "slidePosition": "fixed" })), MountOptions::default())
        .expect("Failed to mount");

    let height = engine.slide_height().expect("Failed to measure");
    let expected = format!("{}px", height);
    assert_eq!(page.document.style(header, "top"), Some(expected.as_str()));

    // A header that turns fixed later is picked up on scroll
    let sticky_nav = element(&mut page, body, "nav");
    page.document.set_style(sticky_nav, "position", "fixed");
    page.document.set_style(sticky_nav, "top", "12px");
    page.scroll_to(200.0, &mut [&mut engine]);
    assert_eq!(page.document.style(sticky_nav, "top"), Some(expected.as_str()));

    engine.unmount(&mut page);
    assert_eq!(page.document.style(header, "top"), None);
    assert_eq!(page.document.style(sticky_nav, "top"), Some("12px"));
}

#[test]
fn test_custom_position_inserts_into_target() {
    let mut page = page();
    let body = page.document.body();
    let header = element(&mut page, body, "header");
    page.document.set_style(header, "position", "fixed");
    let slot = element(&mut page, body, "div");
    page.document.set_attr(slot, "class", "promo-slot");

    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(
            &mut page,
            &campaign(json!({ "slidePosition": "CustomPosition", "customSelector": ".promo-slot" })),
            MountOptions::default(),
        )
        .expect("Failed to mount");

    let host = engine.host().expect("Failed to get host");
    assert_eq!(page.document.parent(host), Some(slot));

    // Still behaves like a fixed bar
    assert_eq!(page.document.style(host, "position"), Some("sticky"));
    assert_eq!(page.document.style(host, "top"), Some("0"));
    let height = engine.slide_height().expect("Failed to measure");
    assert_eq!(page.document.style(header, "top"), Some(format!("{}px", height).as_str()));

    engine.unmount(&mut page);
    assert_eq!(page.document.style(header, "top"), None);
}

#[test]
fn test_fixed_bar_leaves_other_bottom_bar_alone() {
    let mut page = page();
    let body = page.document.body();
    let header = element(&mut page, body, "header");
    page.document.set_style(header, "position", "fixed");

    let mut bottom = SlideEngine::new(EngineConfig::default().with_host_id("bar-bottom"));
    bottom
        .mount(&mut page, &campaign(json!({ "slidePosition": "bottomFixed" })), MountOptions::default())
        .expect("Failed to mount bottom bar");
    let mut top = SlideEngine::new(EngineConfig::default().with_host_id("bar-top"));
    top.mount(&mut page, &campaign(json!({ "slidePosition": "fixed" })), MountOptions::default())
        .expect("Failed to mount top bar");

    let bottom_host = bottom.host().expect("Failed to get bottom host");
    assert_eq!(page.document.style(bottom_host, "bottom"), Some("0"));
    assert_eq!(page.document.style(bottom_host, "top"), None);

    page.scroll_to(300.0, &mut [&mut bottom, &mut top]);
    assert_eq!(page.document.style(bottom_host, "top"), None);
    let height = top.slide_height().expect("Failed to measure");
    assert_eq!(page.document.style(header, "top"), Some(format!("{}px", height).as_str()));
}

#[test]
fn test_embedded_before_add_to_cart() {
    let mut page = page();
    let body = page.document.body();
    let form = element(&mut page, body, "form");
    page.document.set_attr(form, "action", "/cart/add");
    let button = element(&mut page, form, "button");
    page.document.set_attr(button, "type", "submit");

    let mut engine = SlideEngine::new(EngineConfig::default());
    engine
        .mount(
            &mut page,
            &campaign(json!({ "slidePosition": "beforeAddtoCart", "slideType": "embeded" })),
            MountOptions::default(),
        )
        .expect("Failed to mount");

    let host = engine.host().expect("Failed to get host");
    assert_eq!(page.document.parent(host), Some(form));
    assert_eq!(
        page.document.element_index(host).map(|index| index + 1),
        page.document.element_index(button)
    );
}

#[test]
fn test_bottom_fixed_preview_leaves_panel_space() {
    let mut page = page();
    let body = page.document.body();
    let frame = element(&mut page, body, "div");
    element(&mut page, frame, "p");

    let mut preview = Preview::new(EngineConfig::default(), frame);
    preview
        .update(&mut page, &campaign(json!({ "slidePosition": "bottomFixed" })))
        .expect("Failed to update preview");

    let host = preview.engine().host().expect("Failed to get host");
    assert_eq!(page.document.children(frame).last().copied(), Some(host));
    assert_eq!(page.document.style(host, "width"), Some("calc(100% - 360px)"));
    assert_eq!(page.document.style(host, "position"), Some("fixed"));
}

#[test]
fn test_preview_update_is_a_full_remount() {
    let mut page = page();
    let body = page.document.body();
    let frame = element(&mut page, body, "div");

    let mut preview = Preview::new(EngineConfig::default(), frame);
    preview
        .update(&mut page, &campaign(json!({})))
        .expect("Failed to update preview");
    preview
        .update(&mut page, &campaign(json!({})))
        .expect("Failed to update preview again");

    assert_eq!(page.document.element_children(frame).len(), 1);
    assert_eq!(page.scheduler.pending_for(preview.engine().owner()), 1);

    preview.close(&mut page);
    assert!(page.document.element_children(frame).is_empty());
    assert_eq!(page.scheduler.pending(), 0);
}

#[test]
fn test_preview_goal_message_selector() {
    let mut page = page();
    let body = page.document.body();
    let frame = element(&mut page, body, "div");
    let config: CampaignConfig = serde_json::from_value(json!({ "htmlDesign": [
        { "id": "s1", "type": "freeShippingBar", "desktopSetting": { "shippingPrice": 100, "goalMsg": "Free!" } }
    ] }))
    .expect("Failed to build campaign");

    let mut preview = Preview::new(EngineConfig::default(), frame);
    preview.select(Some("goalMessage"));
    preview.update(&mut page, &config).expect("Failed to update preview");

    let bar = preview.engine().shipping_bars()[0];
    assert!(shipping::goal_visible(&page.document, bar));
}

#[test]
fn test_duplicate_preview_renders_both_devices() {
    let mut page = page();
    let body = page.document.body();
    let desktop = element(&mut page, body, "div");
    let mobile = element(&mut page, body, "div");

    let mut preview = DuplicatePreview::new(EngineConfig::default(), desktop, mobile);
    preview
        .update(&mut page, &campaign(json!({})))
        .expect("Failed to update preview");

    assert_eq!(preview.desktop().engine().is_mobile(), Some(false));
    assert_eq!(preview.mobile().engine().is_mobile(), Some(true));
    let desktop_host = preview.desktop().engine().host().expect("Failed to get desktop host");
    let mobile_host = preview.mobile().engine().host().expect("Failed to get mobile host");
    assert_ne!(desktop_host, mobile_host);

    // Both frames rotate even though they share the host id
    page.run(4000, &mut preview.engines_mut());
    assert_eq!(preview.desktop().engine().current_slide(), Some(1));
    assert_eq!(preview.mobile().engine().current_slide(), Some(1));

    preview.close(&mut page);
    assert_eq!(page.scheduler.pending(), 0);
}

#[test]
fn test_multiple_preview_closes_extra_frames() {
    let mut page = page();
    let body = page.document.body();
    let roots = [element(&mut page, body, "div"), element(&mut page, body, "div")];

    let mut preview = MultiplePreview::new(&EngineConfig::default(), &roots);
    let first = campaign(json!({}));
    let second = campaign(json!({}));
    preview
        .update(&mut page, &[first.clone(), second])
        .expect("Failed to update previews");

    let ids: Vec<Option<String>> = preview
        .previews()
        .iter()
        .map(|item| {
            item.engine()
                .host()
                .and_then(|host| page.document.id_of(host).map(str::to_string))
        })
        .collect();
    assert_eq!(
        ids,
        vec![
            Some("announcement-bar-with-slider-0".to_string()),
            Some("announcement-bar-with-slider-1".to_string())
        ]
    );

    preview
        .update(&mut page, &[first])
        .expect("Failed to update previews");
    assert!(preview.previews()[0].engine().is_mounted());
    assert!(!preview.previews()[1].engine().is_mounted());
    assert_eq!(page.scheduler.pending(), 1);
}
