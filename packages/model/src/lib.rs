//! # Slidebar Model
//!
//! Data model of an announcement-bar campaign: a [`CampaignConfig`] holding
//! one or more slides, each an ordered tree of [`BlockDescriptor`]s with
//! per-device setting bags.
//!
//! The model has no rendering behaviour. It guarantees two things the
//! compiler relies on:
//!
//! - JSON round-trips are lossless (block order, unknown keys, unknown kinds)
//! - mobile settings resolve key by key over desktop settings

mod names;

pub mod campaign;
pub mod descriptor;
pub mod error;
pub mod lenient;
pub mod resolve;
pub mod settings;

pub use campaign::{AnimationType, CampaignConfig, SlideDesign, SlidePosition, SlideType};
pub use descriptor::{BlockDescriptor, BlockKind, ButtonRole};
pub use error::{ModelError, ModelResult};
pub use resolve::{merge_settings, Device};
pub use settings::{
    ButtonSetting, ButtonType, CallToActionOption, ClockSetting, CurrencyPosition, EmailSetting,
    ProductSetting, QuantitySetting, RepeatedTimer, ShippingSetting, TextSetting, TimerTextOption,
    TimerType, VariantOption, VariantSetting,
};
