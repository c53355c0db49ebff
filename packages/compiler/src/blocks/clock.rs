use super::{block_dom_id, font_stack, px};
use crate::context::BlockContext;
use crate::timer::TimerSpec;
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, ClockSetting, TimerType};
use tracing::debug;

/// Unit cell classes in display order
pub const CLOCK_UNITS: [&str; 4] = ["days", "hours", "minutes", "seconds"];

pub(crate) fn compile(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: ClockSetting = block.setting_or_default(cx.device);
    let spec = TimerSpec::from_setting(&setting);
    let now = cx.options.now;

    if spec.is_retired(setting.remove_timer, now) {
        debug!(block_id = %block.id, "Omitting expired clock");
        return None;
    }

    let mut list = VNode::element("ul")
        .with_attr("clock-type", setting.timer_type.as_str())
        .with_attr("removeTimer", setting.remove_timer.to_string())
        .with_style("display", "flex")
        .with_style("list-style", "none")
        .with_style("margin", "0")
        .with_style("padding", "0");

    list = match setting.timer_type {
        TimerType::Repeated => list
            .with_attr("repeatedHours", setting.repeated_timer.repeated_hours.to_string())
            .with_attr(
                "repeatTimerCreateDate",
                setting
                    .repeated_timer
                    .repeat_timer_create_date
                    .clone()
                    .unwrap_or_default(),
            )
            .with_attr_opt("repeatedTimeEnd", setting.repeated_timer.repeated_time_end.clone()),
        _ => list.with_attr("date", setting.timer.clone().unwrap_or_default()),
    };

    let labels = [
        &setting.timer_text_option.day_text,
        &setting.timer_text_option.hour_text,
        &setting.timer_text_option.minute_text,
        &setting.timer_text_option.second_text,
    ];
    let digits = spec.countdown(now).padded();

    for (index, unit) in CLOCK_UNITS.iter().enumerate() {
        let mut cell = VNode::element("li")
            .with_attr("class", format!("ab-clock-{}", unit))
            .with_style("text-align", "center")
            .with_style("padding", "0 4px")
            .with_child(
                VNode::element("span")
                    .with_attr("class", "ab-clock-num")
                    .with_child(VNode::text(digits[index].clone())),
            );
        if index < CLOCK_UNITS.len() - 1 {
            cell = cell.with_child(
                VNode::element("span")
                    .with_attr("class", "ab-clock-sep")
                    .with_child(VNode::text(":")),
            );
        }
        if setting.timer_custom_opt {
            cell = cell.with_child(
                VNode::element("span")
                    .with_attr("class", "ab-clock-label")
                    .with_style("display", "block")
                    .with_style("font-size", "0.6em")
                    .with_child(VNode::text(labels[index].clone())),
            );
        }
        list = list.with_child(cell);
    }

    list = list.with_attr_opt(
        "expired-text",
        Some(setting.timer_text_option.expired_text.clone()),
    );
    list = list.with_child(
        VNode::element("li")
            .with_attr("class", "ab-clock-expired")
            .with_style("display", "none")
            .with_child(VNode::text(setting.timer_text_option.expired_text.clone())),
    );

    let wrapper = VNode::div("ab-clock")
        .with_attr("id", block_dom_id(block))
        .with_style("font-size", px(setting.timer_font_size))
        .with_style_opt("font-family", font_stack(setting.timer_font_family.as_deref()))
        .with_style_opt("color", setting.timer_text_color.clone())
        .with_style_opt("background", setting.timer_background_color.clone())
        .with_child(list);

    Some(wrapper)
}
