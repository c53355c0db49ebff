//! # Slide Host Positioning
//!
//! Inserts the host container into the page according to `slidePosition`
//! and undoes every change to foreign nodes on teardown.
//!
//! | position | insertion | container styles |
//! |---|---|---|
//! | `static` | first child | measured height, `transition:0.5s`, `overflow:hidden` |
//! | `fixed` | first child | sticky `top:0`; fixed headers pushed down by the height |
//! | `bottomFixed` | last child | fixed to the viewport bottom |
//! | `CustomPosition` | first child of `customSelector` when it matches, else like `fixed` | as `fixed`, headers offset either way |
//! | `beforeAddtoCart` / `afterAddtoCart` | next to the add-to-cart button (embedded campaigns only) | as `static` |

use crate::dom::{Document, NodeId};
use slidebar_model::{SlidePosition, SlideType};
use tracing::{debug, warn};

/// Add-to-cart buttons of common storefront themes, in lookup order
pub const ADD_TO_CART_SELECTORS: [&str; 4] = [
    "form[action*='/cart/add'] [type=submit]",
    "button[name=add]",
    ".product-form__submit",
    "[data-add-to-cart]",
];

pub const Z_INDEX: &str = "2147483000";

/// Marks every placed container so other bars never treat it as a header
pub const HOST_MARKER: &str = "data-ab-host";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    First,
    Last,
    Before(NodeId),
    After(NodeId),
}

/// A foreign fixed header moved down by the slide height
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderOffset {
    pub node: NodeId,
    pub original_top: Option<String>,
}

/// Where and how the container was placed
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub position: SlidePosition,
    pub parent: NodeId,
    pub anchor: Anchor,
    /// Only `fixed`-like placements offset headers
    pub offsets_headers: bool,
    pub headers: Vec<HeaderOffset>,
}

#[derive(Debug, Clone)]
pub struct PlaceRequest {
    pub position: SlidePosition,
    pub slide_type: SlideType,
    pub custom_selector: Option<String>,
    /// Preview root or the document body
    pub root: NodeId,
    pub height: f64,
    /// Width the admin side panel takes away from a bottom-fixed preview
    pub admin_panel_width: Option<f64>,
}

/// Style and insert `outer`
pub fn place(doc: &mut Document, outer: NodeId, request: &PlaceRequest) -> Placement {
    let height = format!("{}px", request.height);
    let mut placement = Placement {
        position: request.position.clone(),
        parent: request.root,
        anchor: Anchor::First,
        offsets_headers: false,
        headers: Vec::new(),
    };

    match &request.position {
        SlidePosition::Fixed => {
            style_sticky(doc, outer);
            placement.offsets_headers = true;
        }
        SlidePosition::BottomFixed => {
            doc.set_style(outer, "position", "fixed");
            doc.set_style(outer, "bottom", "0");
            doc.set_style(outer, "left", "0");
            doc.set_style(outer, "z-index", Z_INDEX);
            let width = match request.admin_panel_width {
                Some(panel) => format!("calc(100% - {}px)", panel),
                None => "100%".to_string(),
            };
            doc.set_style(outer, "width", &width);
            placement.anchor = Anchor::Last;
        }
        SlidePosition::CustomPosition => {
            style_sticky(doc, outer);
            placement.offsets_headers = true;
            match request
                .custom_selector
                .as_deref()
                .filter(|selector| !selector.trim().is_empty())
                .and_then(|selector| doc.query_selector(doc.root(), selector))
            {
                Some(target) => placement.parent = target,
                None => {
                    debug!(selector = ?request.custom_selector, "Custom position target not found, using fixed");
                }
            }
        }
        SlidePosition::BeforeAddToCart | SlidePosition::AfterAddToCart
            if request.slide_type == SlideType::Embeded =>
        {
            style_static(doc, outer, &height);
            match find_add_to_cart(doc) {
                Some(button) if request.position == SlidePosition::BeforeAddToCart => {
                    placement.anchor = Anchor::Before(button);
                }
                Some(button) => placement.anchor = Anchor::After(button),
                None => {
                    warn!("No add-to-cart button on the page, inserting at document start");
                    placement.parent = doc.body();
                }
            }
        }
        _ => style_static(doc, outer, &height),
    }

    doc.set_attr(outer, HOST_MARKER, "");
    match placement.anchor {
        Anchor::First => doc.prepend_child(placement.parent, outer),
        Anchor::Last => doc.append_child(placement.parent, outer),
        Anchor::Before(reference) => doc.insert_before(reference, outer),
        Anchor::After(reference) => doc.insert_after(reference, outer),
    }

    if placement.offsets_headers {
        offset_headers(doc, &mut placement, outer, request.height);
    }
    debug!(position = %placement.position, "Placed slide host");
    placement
}

fn style_sticky(doc: &mut Document, outer: NodeId) {
    doc.set_style(outer, "position", "sticky");
    doc.set_style(outer, "top", "0");
    doc.set_style(outer, "z-index", Z_INDEX);
}

fn style_static(doc: &mut Document, outer: NodeId, height: &str) {
    doc.set_style(outer, "height", height);
    doc.set_style(outer, "transition", "0.5s");
    doc.set_style(outer, "overflow", "hidden");
}

pub fn find_add_to_cart(doc: &Document) -> Option<NodeId> {
    ADD_TO_CART_SELECTORS
        .iter()
        .find_map(|selector| doc.query_selector(doc.root(), selector))
}

/// Push every fixed element outside the container below the slide. Slide
/// hosts and bottom-anchored elements are not headers. Headers already offset
/// keep their recorded original `top`.
pub fn offset_headers(doc: &mut Document, placement: &mut Placement, outer: NodeId, height: f64) {
    if !placement.offsets_headers {
        return;
    }
    let top = format!("{}px", height);
    let hosts = doc.query_selector_all(doc.root(), &format!("[{}]", HOST_MARKER));
    let headers: Vec<NodeId> = doc
        .elements_with_style("position", "fixed", Some(outer))
        .into_iter()
        .filter(|node| doc.style(*node, "bottom").is_none())
        .filter(|node| !hosts.iter().any(|host| doc.contains(*host, *node)))
        .collect();
    for node in headers {
        if !placement.headers.iter().any(|header| header.node == node) {
            placement.headers.push(HeaderOffset {
                node,
                original_top: doc.style(node, "top").map(str::to_string),
            });
        }
        doc.set_style(node, "top", &top);
    }
}

/// Put back every header `top` this placement changed
pub fn restore_headers(doc: &mut Document, placement: &mut Placement) {
    for header in placement.headers.drain(..) {
        match &header.original_top {
            Some(top) => doc.set_style(header.node, "top", top),
            None => doc.remove_style(header.node, "top"),
        }
    }
}
