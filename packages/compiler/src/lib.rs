//! # Slidebar Compiler
//!
//! Pure compilation of a campaign into virtual element trees, one per slide
//! and device. Nothing here touches a DOM or reads the wall clock: the
//! reference time comes in through [`CompileOptions`].
//!
//! ```text
//! CampaignConfig ──compile_campaign──▶ Vec<CompiledSlide { desktop, mobile }>
//!                                             │
//!                                             └──render_html──▶ static preview
//! ```
//!
//! The live side (timers, cart total, clicks) lives in `slidebar-runtime` and
//! reads the attributes this crate bakes into the tree.

pub mod background;
mod blocks;
pub mod compiler;
pub mod context;
pub mod css;
pub mod error;
pub mod fonts;
pub mod html;
pub mod shipping;
pub mod timer;
pub mod vdom;

pub use blocks::{DEFAULT_HOVER_COLOR, VOID_HREF};
pub use compiler::{attach_layout, compile_campaign, compile_slide, CompiledSlide};
pub use context::{CompileOptions, PreviewTarget, DEFAULT_ASSET_BASE_URL, DEFAULT_HOST_ID};
pub use error::{CompileError, CompileResult};
pub use fonts::{collect_font_families, google_fonts_url, GOOGLE_FONTS_BASE};
pub use html::{render_document, render_host_html, render_html, RenderOptions};
pub use vdom::VNode;

#[cfg(test)]
mod tests_blocks;

#[cfg(test)]
mod tests_compiler;
