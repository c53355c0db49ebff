//! # Block Descriptors
//!
//! A campaign is a tree of typed blocks. Each block carries a desktop setting
//! bag, an optional diff-encoded mobile bag, and (for the composite `emailBar`
//! and `cartBar` kinds) an ordered list of child blocks.
//!
//! Setting bags are stored as raw JSON objects so unknown keys survive a
//! load/save cycle. Typed views are produced on demand with
//! [`BlockDescriptor::setting`].

use crate::error::{ModelError, ModelResult};
use crate::names::string_enum;
use crate::resolve::{merge_settings, Device};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

string_enum! {
    /// Discriminant of a block descriptor (`type` on the wire)
    pub enum BlockKind {
        Text => "Text",
        Button => "Button",
        Clock => "Clock",
        FreeShippingBar => "freeShippingBar",
        ProductTitle => "productTitle",
        Variant => "variant",
        Quantity => "quantity",
        EmailBar => "emailBar",
        CartBar => "cartBar",
        /// Input field child of `emailBar`
        Email => "Email",
    }
    default = Text;
}

impl BlockKind {
    /// Composite kinds flatten their children into the parent's output
    pub fn is_composite(&self) -> bool {
        matches!(self, BlockKind::EmailBar | BlockKind::CartBar)
    }
}

string_enum! {
    /// Semantic tag on composite Button children (`dataType`)
    pub enum ButtonRole {
        ContactSubmit => "Contact-Submit",
        AddToCart => "Add-To-Cart",
    }
    default = ContactSubmit;
}

/// One configured visual unit within a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    pub id: String,

    #[serde(rename = "type")]
    kind: BlockKind,

    #[serde(default)]
    pub desktop_setting: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_setting: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_component: Option<Vec<BlockDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<ButtonRole>,

    /// Keys this build does not interpret, kept for lossless round-trips
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockDescriptor {
    pub fn new(id: impl Into<String>, kind: BlockKind, desktop_setting: Value) -> Self {
        Self {
            id: id.into(),
            kind,
            desktop_setting: into_object(desktop_setting),
            mobile_setting: None,
            child_component: None,
            data_type: None,
            extra: Map::new(),
        }
    }

    pub fn with_mobile(mut self, mobile_setting: Value) -> Self {
        self.mobile_setting = Some(into_object(mobile_setting));
        self
    }

    pub fn with_children(mut self, children: Vec<BlockDescriptor>) -> Self {
        self.child_component = Some(children);
        self
    }

    pub fn with_role(mut self, role: ButtonRole) -> Self {
        self.data_type = Some(role);
        self
    }

    /// Block type. Fixed at creation; there is no setter.
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn children(&self) -> &[BlockDescriptor] {
        self.child_component.as_deref().unwrap_or(&[])
    }

    /// Setting bag for a device, with mobile keys overlaid on desktop keys
    pub fn setting_bag(&self, device: Device) -> Map<String, Value> {
        match device {
            Device::Desktop => self.desktop_setting.clone(),
            Device::Mobile => merge_settings(&self.desktop_setting, self.mobile_setting.as_ref()),
        }
    }

    /// Typed view of the resolved setting bag
    pub fn setting<T: DeserializeOwned>(&self, device: Device) -> ModelResult<T> {
        serde_json::from_value(Value::Object(self.setting_bag(device))).map_err(|e| {
            ModelError::InvalidSetting {
                block_id: self.id.clone(),
                kind: self.kind.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Like [`setting`](Self::setting), falling back to defaults on malformed input
    pub fn setting_or_default<T: DeserializeOwned + Default>(&self, device: Device) -> T {
        match self.setting(device) {
            Ok(setting) => setting,
            Err(err) => {
                warn!(block_id = %self.id, error = %err, "Falling back to default setting");
                T::default()
            }
        }
    }

    /// Depth-first iterator over this block and all descendants
    pub fn walk(&self) -> Vec<&BlockDescriptor> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
