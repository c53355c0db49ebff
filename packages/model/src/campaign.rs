//! # Campaign Configuration
//!
//! Root object of one announcement campaign as handed over by the admin
//! editor. The rendering core only reads it, apart from the derived
//! `htmlLayout` cache which is written once before mount.

use crate::descriptor::{BlockDescriptor, BlockKind};
use crate::error::ModelResult;
use crate::lenient;
use crate::names::string_enum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

string_enum! {
    /// Where the host container is inserted
    pub enum SlidePosition {
        Static => "static",
        Fixed => "fixed",
        BottomFixed => "bottomFixed",
        CustomPosition => "CustomPosition",
        BeforeAddToCart => "beforeAddtoCart",
        AfterAddToCart => "afterAddtoCart",
    }
    default = Static;
}

string_enum! {
    pub enum AnimationType {
        Rotating => "rotating",
        MultiRotating => "multiRotating",
        Marquee => "marquee",
    }
    default = Rotating;
}

string_enum! {
    /// Campaign archetype
    pub enum SlideType {
        PromotionBar => "promotionBar",
        ShippingBar => "shippingBar",
        Cart => "cart",
        Email => "email",
        Embeded => "embeded",
        Countdown => "countdown",
    }
    default = PromotionBar;
}

/// One slide of a multi-slide campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideDesign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "mobilebackgroundColor", skip_serializing_if = "Option::is_none")]
    pub mobile_background_color: Option<String>,
    pub html_design: Vec<BlockDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(rename = "mobilebackgroundColor", skip_serializing_if = "Option::is_none")]
    pub mobile_background_color: Option<String>,

    /// Root-level blocks; order is visual order
    pub html_design: Vec<BlockDescriptor>,

    /// Additional slides; when absent the fields above form the only slide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<SlideDesign>>,

    pub slide_position: SlidePosition,
    pub animation_type: AnimationType,
    pub slide_type: SlideType,

    #[serde(deserialize_with = "lenient::number")]
    pub slide_padding: f64,

    /// Transition length in milliseconds (marquee: seconds per loop fallback)
    #[serde(deserialize_with = "lenient::number")]
    pub text_animation_time: f64,

    /// Gap between marquee copies in pixels
    #[serde(deserialize_with = "lenient::number")]
    pub text_animation_padding: f64,

    /// Fixed marquee item width in pixels; 0 means measured
    #[serde(deserialize_with = "lenient::number")]
    pub text_animation_width: f64,

    /// Pause between rotations in milliseconds
    #[serde(deserialize_with = "lenient::number")]
    pub autoplay_time: f64,

    /// Marquee speed in px/sec; measured from `textAnimationTime` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marquee_speed: Option<f64>,

    #[serde(deserialize_with = "lenient::flag")]
    pub removable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_selector: Option<String>,

    /// Derived compile output, written by the compiler before mount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_layout: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            id: None,
            background_color: None,
            mobile_background_color: None,
            html_design: Vec::new(),
            slides: None,
            slide_position: SlidePosition::Static,
            animation_type: AnimationType::Rotating,
            slide_type: SlideType::PromotionBar,
            slide_padding: 10.0,
            text_animation_time: 1000.0,
            text_animation_padding: 40.0,
            text_animation_width: 0.0,
            autoplay_time: 3000.0,
            marquee_speed: None,
            removable: false,
            custom_selector: None,
            html_layout: None,
            extra: Map::new(),
        }
    }
}

impl CampaignConfig {
    pub fn from_json(source: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Slides in display order
    pub fn slide_designs(&self) -> Cow<'_, [SlideDesign]> {
        match &self.slides {
            Some(slides) if !slides.is_empty() => Cow::Borrowed(slides.as_slice()),
            _ => Cow::Owned(vec![SlideDesign {
                id: self.id.clone(),
                background_color: self.background_color.clone(),
                mobile_background_color: self.mobile_background_color.clone(),
                html_design: self.html_design.clone(),
            }]),
        }
    }

    pub fn slide_count(&self) -> usize {
        match &self.slides {
            Some(slides) if !slides.is_empty() => slides.len(),
            _ => 1,
        }
    }

    /// Every block of every slide, depth first
    pub fn all_blocks(&self) -> Vec<BlockDescriptor> {
        self.slide_designs()
            .iter()
            .flat_map(|slide| slide.html_design.iter())
            .flat_map(|block| block.walk().into_iter().cloned())
            .collect()
    }

    pub fn has_block(&self, kind: &BlockKind) -> bool {
        self.all_blocks().iter().any(|block| block.kind() == kind)
    }
}
