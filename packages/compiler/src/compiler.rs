//! # Root Assembly
//!
//! Turns one slide of a [`CampaignConfig`] into a `div.ab-slide` tree for one
//! device.
//!
//! ## Layout
//!
//! ```text
//! div.ab-slide
//! ├── div.ab-slide-content.active      (or a.ab-slide-entire in entire-bar mode)
//! ├── div.ab-slide-content.email-success   (only when a composite has Text children)
//! └── div.ab-slide-remove              (only when the campaign is removable)
//! ```
//!
//! ## Entire-bar mode
//!
//! A top-level Button with `buttonType: entire` turns the whole slide into a
//! single link. Every other button of the slide is suppressed and two hover
//! rules for the whole bar are injected instead.

use crate::background::normalize_background;
use crate::blocks::{assign_button_positions, compile_block, px, Compiled, VOID_HREF};
use crate::context::{BlockContext, CompileOptions};
use crate::css::{slide_hover_selector, StyleRule};
use crate::error::{CompileError, CompileResult};
use crate::vdom::VNode;
use serde::{Deserialize, Serialize};
use slidebar_model::{
    BlockDescriptor, BlockKind, ButtonSetting, ButtonType, CampaignConfig, Device, SlideDesign,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// The cached `htmlLayout` of one slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledSlide {
    pub desktop: VNode,
    pub mobile: VNode,
}

impl CompiledSlide {
    pub fn for_device(&self, device: Device) -> &VNode {
        match device {
            Device::Desktop => &self.desktop,
            Device::Mobile => &self.mobile,
        }
    }
}

/// Compile one slide for one device
#[instrument(skip(config, options), fields(campaign = ?config.id))]
pub fn compile_slide(
    config: &CampaignConfig,
    slide_index: usize,
    mobile: bool,
    options: &CompileOptions,
) -> CompileResult<VNode> {
    let designs = config.slide_designs();
    let design = designs.get(slide_index).ok_or(CompileError::SlideOutOfRange {
        index: slide_index,
        count: designs.len(),
    })?;
    Ok(assemble(config, design, Device::from_mobile_flag(mobile), options))
}

/// Compile every slide for both devices
#[instrument(skip(config, options), fields(campaign = ?config.id))]
pub fn compile_campaign(config: &CampaignConfig, options: &CompileOptions) -> Vec<CompiledSlide> {
    let slides: Vec<CompiledSlide> = config
        .slide_designs()
        .iter()
        .map(|design| CompiledSlide {
            desktop: assemble(config, design, Device::Desktop, options),
            mobile: assemble(config, design, Device::Mobile, options),
        })
        .collect();
    debug!(slides = slides.len(), "Compiled campaign");
    slides
}

/// Compile and store the result in the config's derived `htmlLayout` field
pub fn attach_layout(config: &mut CampaignConfig, options: &CompileOptions) -> CompileResult<()> {
    let slides = compile_campaign(config, options);
    let value = match slides.as_slice() {
        [single] => serde_json::to_value(single)?,
        many => serde_json::to_value(many)?,
    };
    config.html_layout = Some(value);
    Ok(())
}

fn assemble(
    config: &CampaignConfig,
    design: &SlideDesign,
    device: Device,
    options: &CompileOptions,
) -> VNode {
    let entire = entire_button(&design.html_design, device);
    let cx = BlockContext {
        device,
        options,
        entire: entire.is_some(),
    };

    let mut content = Vec::new();
    let mut success = Vec::new();
    for block in &design.html_design {
        match compile_block(block, &cx) {
            Some(Compiled::Node(node)) => content.push(node),
            Some(Compiled::Composite {
                node,
                success: nested,
            }) => {
                content.push(node);
                success.extend(nested);
            }
            None => {}
        }
    }

    let background = design
        .background_color
        .as_deref()
        .map(|value| normalize_background(value, &options.asset_base_url))
        .unwrap_or_default();

    let mut root = VNode::div("ab-slide")
        .with_style("padding", format!("{} 0", px(config.slide_padding)))
        .with_style("position", "relative")
        .with_style_opt("background", Some(background));
    if let Some(id) = &design.id {
        root = root.with_attr("data-slide-id", id.clone());
    }

    // Same override in both compiles; the materializer picks it up on mobile
    if let Some(mobile_background) = design.mobile_background_color.as_deref() {
        let mut mobile_styles: BTreeMap<String, String> = match &root {
            VNode::Element { styles, .. } => styles.clone(),
            _ => BTreeMap::new(),
        };
        let normalized = normalize_background(mobile_background, &options.asset_base_url);
        if normalized.is_empty() {
            mobile_styles.remove("background");
        } else {
            mobile_styles.insert("background".to_string(), normalized);
        }
        root = root.with_mobile_styles(mobile_styles);
    }

    root = match entire {
        Some(setting) => root
            .with_child(entire_anchor(&setting, content))
            .with_children(entire_rules(&setting, &options.host_id)),
        None => {
            assign_button_positions(&mut content);
            root.with_child(content_wrapper().with_class("active").with_children(content))
        }
    };

    if !success.is_empty() {
        root = root.with_child(
            content_wrapper()
                .with_class("email-success")
                .with_style("display", "none")
                .with_children(success),
        );
    }

    if config.removable {
        root = root.with_child(
            VNode::div("ab-slide-remove")
                .with_style("position", "absolute")
                .with_style("right", "10px")
                .with_style("top", "50%")
                .with_style("transform", "translateY(-50%)")
                .with_style("cursor", "pointer")
                .with_child(VNode::markup("&times;")),
        );
    }

    root
}

fn content_wrapper() -> VNode {
    VNode::div("ab-slide-content")
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("justify-content", "center")
        .with_style("flex-wrap", "wrap")
        .with_style("gap", "10px")
}

/// Setting of the first top-level entire-bar button, if any
fn entire_button(blocks: &[BlockDescriptor], device: Device) -> Option<ButtonSetting> {
    blocks
        .iter()
        .filter(|block| matches!(block.kind(), BlockKind::Button))
        .map(|block| block.setting_or_default::<ButtonSetting>(device))
        .find(|setting| matches!(setting.button_type(), ButtonType::Entire))
}

fn entire_anchor(setting: &ButtonSetting, content: Vec<VNode>) -> VNode {
    let href = setting
        .btn_link
        .clone()
        .filter(|link| !link.trim().is_empty())
        .unwrap_or_else(|| VOID_HREF.to_string());

    VNode::element("a")
        .with_attr("class", "ab-slide-entire")
        .with_attr("href", href)
        .with_attr("target", if setting.open_new_tab { "_blank" } else { "" })
        .with_style("display", "block")
        .with_style("text-decoration", "none")
        .with_style("color", "inherit")
        .with_child(
            content_wrapper()
                .with_class("active")
                .with_children(content),
        )
}

fn entire_rules(setting: &ButtonSetting, host_id: &str) -> Vec<VNode> {
    let background = StyleRule::new(slide_hover_selector(host_id, ""))
        .with_property_opt(
            "background",
            setting.btn_hover_color.as_deref().or(setting.btn_color.as_deref()),
        );
    let color = StyleRule::new(slide_hover_selector(host_id, ".ab-slide-text h4"))
        .with_property_opt(
            "color",
            setting
                .btn_hover_text_color
                .as_deref()
                .or(setting.btn_text_color.as_deref()),
        );

    [background, color]
        .into_iter()
        .filter(|rule| !rule.is_empty())
        .map(VNode::style)
        .collect()
}
