//! # Slidebar Runtime
//!
//! Hosts compiled campaigns on a page: materializes the virtual trees, wires
//! live widgets, positions the host container and runs the slide animation.
//!
//! ```text
//! CampaignConfig ─▶ SlideEngine::mount ─▶ Page (document, timers, clipboard)
//!                          │                     │
//!                          │◀──── Page::run ─────┘  (virtual clock)
//!                          ▼
//!                   SlideEngine::unmount          (cancels everything it owns)
//! ```
//!
//! The page is single-threaded and cooperative. Nothing here spawns threads
//! or awaits; timers fire only when the host advances the clock.

pub mod animation;
pub mod behavior;
pub mod cart;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod layout;
pub mod materialize;
pub mod page;
pub mod preview;
pub mod scheduler;
pub mod widgets;

pub use animation::{Animation, Direction};
pub use cart::{CartSource, CartTotal, StaticCart, UnavailableCart};
pub use config::{EngineConfig, Environment};
pub use dom::{Document, NodeId};
pub use engine::{MountOptions, SlideEngine, Task};
pub use error::{CartError, EngineError, EngineResult};
pub use events::SlideEvent;
pub use layout::{EstimatedLayout, Layout};
pub use page::Page;
pub use preview::{DuplicatePreview, MultiplePreview, Preview};
pub use scheduler::{OwnerId, Scheduler, TimerId};
