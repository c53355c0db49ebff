use super::{block_dom_id, px};
use crate::context::BlockContext;
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, ProductSetting, QuantitySetting, VariantSetting};

pub(crate) fn compile_title(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: ProductSetting = block.setting_or_default(cx.device);

    let mut node = VNode::div("ab-product")
        .with_attr("id", block_dom_id(block))
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("gap", "8px")
        .with_style_opt("color", setting.text_color.clone());

    if setting.show_image {
        if let Some(image) = setting.product_image.as_deref().filter(|src| !src.is_empty()) {
            node = node.with_child(
                VNode::element("img")
                    .with_attr("class", "ab-product-image")
                    .with_attr("src", image)
                    .with_attr("alt", setting.product_title.clone())
                    .with_style("height", "36px"),
            );
        }
    }
    if setting.show_title {
        node = node.with_child(
            VNode::element("h4")
                .with_attr("class", "ab-product-title")
                .with_style("margin", "0")
                .with_style("font-size", px(setting.font_size))
                .with_child(VNode::text(setting.product_title.clone())),
        );
    }
    if setting.show_price {
        if let Some(price) = setting.product_price.as_deref() {
            node = node.with_child(
                VNode::element("span")
                    .with_attr("class", "ab-product-price")
                    .with_child(VNode::text(price)),
            );
        }
    }
    Some(node)
}

pub(crate) fn compile_variant(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: VariantSetting = block.setting_or_default(cx.device);
    if !setting.show_variant {
        return None;
    }

    let mut select = VNode::element("select")
        .with_attr("class", "ab-variant-select")
        .with_attr("name", "id");
    for (index, option) in setting.variants.iter().enumerate() {
        let mut node = VNode::element("option")
            .with_attr("value", option.id.clone())
            .with_child(VNode::text(option.title.clone()));
        let selected = match &setting.selected_variant {
            Some(selected) => selected == &option.id,
            None => index == 0,
        };
        if selected {
            node = node.with_attr("selected", "selected");
        }
        select = select.with_child(node);
    }

    Some(
        VNode::div("ab-variant")
            .with_attr("id", block_dom_id(block))
            .with_child(select),
    )
}

pub(crate) fn compile_quantity(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<VNode> {
    let setting: QuantitySetting = block.setting_or_default(cx.device);
    if !setting.show_quantity {
        return None;
    }
    let start = setting.default_quantity.max(1.0) as u32;

    Some(
        VNode::div("Quantity")
            .with_attr("id", block_dom_id(block))
            .with_style("display", "inline-flex")
            .with_style("align-items", "center")
            .with_child(
                VNode::element("button")
                    .with_attr("class", "ab-qty-minus")
                    .with_attr("type", "button")
                    .with_child(VNode::text("-")),
            )
            .with_child(
                VNode::element("input")
                    .with_attr("class", "ab-qty-input")
                    .with_attr("type", "number")
                    .with_attr("min", "1")
                    .with_attr("name", "quantity")
                    .with_attr("value", start.to_string())
                    .with_style("width", "40px")
                    .with_style("text-align", "center"),
            )
            .with_child(
                VNode::element("button")
                    .with_attr("class", "ab-qty-plus")
                    .with_attr("type", "button")
                    .with_child(VNode::text("+")),
            ),
    )
}
