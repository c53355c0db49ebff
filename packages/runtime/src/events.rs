//! Events reported back to the embedding host.

use crate::animation::Direction;
use serde::Serialize;

/// Something the shopper did, drained by the host with
/// [`crate::engine::SlideEngine::take_events`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SlideEvent {
    /// A link was followed
    Click { href: String, new_tab: bool },
    /// The email bar was submitted
    Submit { email: String },
    AddToCart { variant: Option<String>, quantity: u32 },
    Copied { text: String },
    /// The close icon tore the bar down
    Dismissed,
    Navigated { direction: Direction, slide: usize },
}
