use super::{block_dom_id, font_stack, px};
use crate::context::{BlockContext, PreviewTarget};
use crate::shipping::{ShippingAttributes, ShippingState, ATTR_GOAL, ATTR_PRICE};
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, ShippingSetting};

pub(crate) fn compile(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: ShippingSetting = block.setting_or_default(cx.device);
    let attrs = ShippingAttributes::from_setting(&setting);

    let show_goal = match cx.options.preview {
        PreviewTarget::GoalMessage => true,
        PreviewTarget::Default => matches!(attrs.state(0.0), ShippingState::Goal),
    };
    let remaining = match attrs.state(0.0) {
        ShippingState::Progress { remaining } => remaining,
        ShippingState::Goal => 0.0,
    };

    let mut progress = VNode::element("span").with_attr("class", "ab-shipping-progress");
    for (name, value) in attrs.progress_attributes() {
        progress = progress.with_attr(name, value);
    }
    if show_goal {
        progress = progress.with_style("display", "none");
    }
    progress = progress
        .with_child(
            VNode::element("span")
                .with_attr("class", "ab-shipping-start")
                .with_child(VNode::text(format!("{} ", attrs.start))),
        )
        .with_child(
            VNode::element("span")
                .with_attr("class", "ab-shipping-price")
                .with_style_opt("color", setting.price_color.clone())
                .with_child(VNode::text(attrs.remaining_text(remaining))),
        )
        .with_child(
            VNode::element("span")
                .with_attr("class", "ab-shipping-end")
                .with_child(VNode::text(format!(" {}", attrs.end))),
        );

    let mut goal = VNode::element("span")
        .with_attr("class", "ab-shipping-goal")
        .with_attr(ATTR_GOAL, attrs.goal.clone())
        .with_attr(ATTR_PRICE, progress.attr(ATTR_PRICE).unwrap_or_default().to_string())
        .with_child(VNode::text(attrs.goal.clone()));
    if !show_goal {
        goal = goal.with_style("display", "none");
    }

    let heading = VNode::element("h4")
        .with_style("margin", "0")
        .with_style("font-size", px(setting.font_size))
        .with_style_opt("font-family", font_stack(setting.font_family.as_deref()))
        .with_style_opt("color", setting.text_color.clone())
        .with_child(progress)
        .with_child(goal);

    Some(
        VNode::div("ab-slide-shipping")
            .with_attr("id", block_dom_id(block))
            .with_child(heading),
    )
}
