//! Composite blocks: `emailBar` and `cartBar`.
//!
//! Children are compiled by their own sub-compilers and laid out as flat
//! siblings inside one wrapper. Text children are not part of the bar; they
//! form the success view shown after the form is submitted.

use super::{assign_button_positions, block_dom_id, compile_block, Compiled};
use crate::context::BlockContext;
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, BlockKind, EmailSetting};

pub(crate) fn compile_email_input(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: EmailSetting = block.setting_or_default(cx.device);

    let mut input = VNode::element("input")
        .with_attr("type", "email")
        .with_attr("name", "email")
        .with_attr("placeholder", setting.placeholder.clone())
        .with_style("padding", "6px 10px")
        .with_style_opt("background", setting.input_background.clone())
        .with_style_opt("color", setting.input_text_color.clone());
    if let Some(border) = setting.input_border_color.as_deref().filter(|c| !c.is_empty()) {
        input = input.with_style("border", format!("1px solid {}", border));
    }
    if setting.required {
        input = input.with_attr("required", "required");
    }

    Some(
        VNode::div("ab-slide-email-input")
            .with_attr("id", block_dom_id(block))
            .with_child(input),
    )
}

pub(crate) fn compile_email_bar(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<Compiled> {
    compile_composite(block, cx, "ab-slide-email")
}

pub(crate) fn compile_cart_bar(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<Compiled> {
    compile_composite(block, cx, "ab-slide-cart")
}

fn compile_composite(block: &BlockDescriptor, cx: &BlockContext<'_>, class: &str) -> Option<Compiled> {
    // Composite buttons stay even when the whole slide is one link
    let inner = BlockContext {
        device: cx.device,
        options: cx.options,
        entire: false,
    };
    let mut children = Vec::new();
    let mut success = Vec::new();
    for child in block.children() {
        let compiled = match compile_block(child, &inner) {
            Some(compiled) => compiled,
            None => continue,
        };
        match compiled {
            Compiled::Node(node) if matches!(child.kind(), BlockKind::Text) => success.push(node),
            Compiled::Node(node) => children.push(node),
            Compiled::Composite {
                node,
                success: nested,
            } => {
                children.push(node);
                success.extend(nested);
            }
        }
    }
    assign_button_positions(&mut children);

    let node = VNode::div(class)
        .with_attr("id", block_dom_id(block))
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("gap", "10px")
        .with_children(children);

    Some(Compiled::Composite { node, success })
}
