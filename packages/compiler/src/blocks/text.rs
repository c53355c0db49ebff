use super::{block_dom_id, font_stack, px};
use crate::context::BlockContext;
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, TextSetting};

pub(crate) fn compile(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: TextSetting = block.setting_or_default(cx.device);

    let mut wrapper = VNode::div("ab-slide-text").with_attr("id", block_dom_id(block));
    if setting.rich_text {
        wrapper = wrapper.with_class("ql-editor");
    }

    let content = if setting.rich_text {
        VNode::markup(setting.text.clone())
    } else {
        VNode::text(setting.text.clone())
    };

    let mut heading = VNode::element("h4")
        .with_style("margin", "0")
        .with_style("font-size", px(setting.font_size))
        .with_style_opt("font-family", font_stack(setting.font_family.as_deref()))
        .with_style_opt("font-weight", setting.font_weight.clone())
        .with_style_opt("color", setting.text_color.clone())
        .with_style_opt("text-align", setting.text_align.clone());
    if setting.italic {
        heading = heading.with_style("font-style", "italic");
    }
    if setting.underline {
        heading = heading.with_style("text-decoration", "underline");
    }
    if setting.letter_spacing != 0.0 {
        heading = heading.with_style("letter-spacing", px(setting.letter_spacing));
    }

    Some(wrapper.with_child(heading.with_child(content)))
}
