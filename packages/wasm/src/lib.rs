//! Browser entry points for the admin editor and the storefront loader.
//!
//! Every binding takes the campaign as JSON and the page clock as
//! milliseconds since the epoch (`Date.now()`), so nothing here reads time
//! on its own.

use chrono::{TimeZone, Utc};
use serde::Serialize;
use slidebar_compiler::{
    attach_layout, collect_font_families, compile_campaign, compile_slide, google_fonts_url,
    render_html, CompileOptions, PreviewTarget, RenderOptions, GOOGLE_FONTS_BASE,
};
use slidebar_model::CampaignConfig;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct RenderedSlide {
    html: String,
    slide_count: usize,
}

#[wasm_bindgen]
impl RenderedSlide {
    #[wasm_bindgen(getter)]
    pub fn html(&self) -> String {
        self.html.clone()
    }

    #[wasm_bindgen(getter, js_name = slideCount)]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }
}

fn parse_campaign(source: &str) -> Result<CampaignConfig, String> {
    CampaignConfig::from_json(source).map_err(|e| format!("Campaign error: {}", e))
}

fn options_at(now_ms: f64, preview: Option<&str>) -> Result<CompileOptions, String> {
    let now = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))?;
    Ok(CompileOptions::at(now).with_preview(PreviewTarget::from_selector(preview)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn compile_campaign_json(source: &str, now_ms: f64) -> Result<String, String> {
    let config = parse_campaign(source)?;
    let options = options_at(now_ms, None)?;
    to_json(&compile_campaign(&config, &options))
}

fn attach_layout_json(source: &str, now_ms: f64) -> Result<String, String> {
    let mut config = parse_campaign(source)?;
    let options = options_at(now_ms, None)?;
    attach_layout(&mut config, &options).map_err(|e| format!("Compile error: {}", e))?;
    to_json(&config)
}

fn render_slide(
    source: &str,
    index: usize,
    mobile: bool,
    now_ms: f64,
    preview: Option<&str>,
) -> Result<RenderedSlide, String> {
    let config = parse_campaign(source)?;
    let options = options_at(now_ms, preview)?;
    let tree = compile_slide(&config, index, mobile, &options)
        .map_err(|e| format!("Compile error: {}", e))?;
    let render = RenderOptions {
        mobile,
        ..RenderOptions::default()
    };
    Ok(RenderedSlide {
        html: render_html(&tree, index + 1, &render),
        slide_count: config.slide_count(),
    })
}

fn font_url(source: &str) -> Result<Option<String>, String> {
    let config = parse_campaign(source)?;
    Ok(google_fonts_url(GOOGLE_FONTS_BASE, &collect_font_families(&config)))
}

/// Compile every slide for both devices; returns the trees as JSON
#[wasm_bindgen(js_name = compileCampaign)]
pub fn compile_campaign_js(source: &str, now_ms: f64) -> Result<String, JsValue> {
    compile_campaign_json(source, now_ms).map_err(|e| JsValue::from_str(&e))
}

/// Return the campaign JSON with `htmlLayout` filled in, ready to save
#[wasm_bindgen(js_name = attachLayout)]
pub fn attach_layout_js(source: &str, now_ms: f64) -> Result<String, JsValue> {
    attach_layout_json(source, now_ms).map_err(|e| JsValue::from_str(&e))
}

/// Static HTML of one slide, as the editor preview shows it
#[wasm_bindgen(js_name = renderSlideHtml)]
pub fn render_slide_html_js(
    source: &str,
    index: usize,
    mobile: bool,
    now_ms: f64,
    preview_selector: Option<String>,
) -> Result<RenderedSlide, JsValue> {
    render_slide(source, index, mobile, now_ms, preview_selector.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Google Fonts stylesheet for the families the campaign uses
#[wasm_bindgen(js_name = fontStylesheetUrl)]
pub fn font_stylesheet_url_js(source: &str) -> Result<Option<String>, JsValue> {
    font_url(source).map_err(|e| JsValue::from_str(&e))
}
