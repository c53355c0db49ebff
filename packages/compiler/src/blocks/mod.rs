//! One pure sub-compiler per block kind, composed by [`compile_block`].

mod button;
mod clock;
mod composite;
mod product;
mod shipping;
mod text;

pub use button::{DEFAULT_HOVER_COLOR, VOID_HREF};

use crate::context::BlockContext;
use crate::vdom::VNode;
use slidebar_model::{BlockDescriptor, BlockKind};
use tracing::debug;

/// Output of one block sub-compiler
pub(crate) enum Compiled {
    Node(VNode),
    /// Composite blocks also route their Text children to the success view
    Composite { node: VNode, success: Vec<VNode> },
}

pub(crate) fn compile_block(block: &BlockDescriptor, cx: &BlockContext<'_>) -> Option<Compiled> {
    let node = match block.kind() {
        BlockKind::Text => text::compile(block, cx),
        BlockKind::Button => button::compile(block, cx),
        BlockKind::Clock => clock::compile(block, cx),
        BlockKind::FreeShippingBar => shipping::compile(block, cx),
        BlockKind::ProductTitle => product::compile_title(block, cx),
        BlockKind::Variant => product::compile_variant(block, cx),
        BlockKind::Quantity => product::compile_quantity(block, cx),
        BlockKind::Email => composite::compile_email_input(block, cx),
        BlockKind::EmailBar => return composite::compile_email_bar(block, cx),
        BlockKind::CartBar => return composite::compile_cart_bar(block, cx),
        BlockKind::Other(kind) => {
            debug!(block_id = %block.id, kind = %kind, "Skipping unknown block kind");
            None
        }
    };
    node.map(Compiled::Node)
}

/// Stamp 1-based sibling positions onto the hover rules of button children.
///
/// `nth-child` counts element siblings, so the position is the index in the
/// final child list, not the index among buttons.
pub(crate) fn assign_button_positions(children: &mut [VNode]) {
    for (index, child) in children.iter_mut().enumerate() {
        if !child.has_class("ab-slide-btn") {
            continue;
        }
        if let Some(grandchildren) = child.children_mut() {
            for node in grandchildren.iter_mut() {
                if let VNode::Style { rule } = node {
                    rule.sibling_index = Some(index + 1);
                }
            }
        }
    }
}

pub(crate) fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

pub(crate) fn block_dom_id(block: &BlockDescriptor) -> String {
    format!("ab-block-{}", block.id)
}

pub(crate) fn font_stack(family: Option<&str>) -> Option<String> {
    family
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| format!("'{}', sans-serif", f.trim_matches(|c| c == '"' || c == '\'')))
}
