use super::{block_dom_id, font_stack, px};
use crate::context::BlockContext;
use crate::css::{button_hover_selector, StyleRule};
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, ButtonSetting, ButtonType};

/// Placeholder href; the materializer never writes it to the DOM
pub const VOID_HREF: &str = "javascript:void(0);";

/// Hover text colour when no button colours are configured
pub const DEFAULT_HOVER_COLOR: &str = "inherit";

pub(crate) fn compile(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: ButtonSetting = block.setting_or_default(cx.device);

    // Entire-bar mode wraps the whole slide at the root instead; composites
    // compile their children with `entire` off
    if matches!(setting.button_type(), ButtonType::Entire) || cx.entire {
        return None;
    }

    let coupon = matches!(setting.button_type(), ButtonType::BtnCoupon);
    let link_style = matches!(setting.button_type(), ButtonType::BtnLink);

    let href = if coupon || block.data_type.is_some() {
        VOID_HREF.to_string()
    } else {
        setting
            .btn_link
            .clone()
            .filter(|link| !link.trim().is_empty())
            .unwrap_or_else(|| VOID_HREF.to_string())
    };

    let mut anchor = VNode::element("a")
        .with_attr("href", href)
        .with_attr("target", if setting.open_new_tab { "_blank" } else { "" })
        .with_style("font-size", px(setting.btn_font_size))
        .with_style_opt("font-family", font_stack(setting.btn_font_family.as_deref()))
        .with_style_opt("color", setting.btn_text_color.clone())
        .with_style("cursor", "pointer");

    anchor = if link_style {
        anchor
            .with_style("background", "transparent")
            .with_style("border", "none")
            .with_style("padding", "0")
            .with_style("text-decoration", "underline")
    } else {
        let border_color = setting
            .btn_border_color
            .clone()
            .or_else(|| setting.btn_color.clone())
            .unwrap_or_else(|| "transparent".to_string());
        let border_kind = if coupon { "dashed" } else { "solid" };
        anchor
            .with_style_opt("background", setting.btn_color.clone())
            .with_style(
                "border",
                format!("{} {} {}", px(setting.btn_border_width), border_kind, border_color),
            )
            .with_style("border-radius", px(setting.btn_radius))
            .with_style(
                "padding",
                setting.btn_padding.clone().unwrap_or_else(|| "6px 14px".to_string()),
            )
            .with_style("display", "inline-block")
            .with_style("text-decoration", "none")
    };

    let mut wrapper = VNode::div("ab-slide-btn").with_attr("id", block_dom_id(block));
    if let Some(role) = &block.data_type {
        wrapper = wrapper.with_attr("data-Type", role.as_str());
    }
    if coupon {
        let code = setting
            .coupon_code
            .clone()
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| setting.btn_name.clone());
        wrapper = wrapper.with_attr("copyText", "true").with_attr("copied-text", code);
    }

    let hover_background = if link_style {
        None
    } else {
        setting.btn_hover_color.as_deref().or(setting.btn_color.as_deref())
    };
    let hover_color = setting
        .btn_hover_text_color
        .as_deref()
        .or(setting.btn_text_color.as_deref())
        .unwrap_or(DEFAULT_HOVER_COLOR);
    let rule = StyleRule::new(button_hover_selector(&cx.options.host_id))
        .with_property_opt("background", hover_background)
        .with_property("color", hover_color);

    Some(
        wrapper
            .with_child(anchor.with_child(VNode::text(setting.btn_name.clone())))
            .with_child(VNode::style(rule)),
    )
}
