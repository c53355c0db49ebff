//! Small self-contained DOM behaviours attached during materialization.

pub mod clipboard;
pub mod countdown;
pub mod notification;
pub mod quantity;
pub mod shipping;
