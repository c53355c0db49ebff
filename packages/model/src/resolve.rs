//! Device-specific setting resolution.
//!
//! `mobileSetting` is diff-encoded against `desktopSetting`: only the keys
//! that differ are stored. Resolution is key-by-key and recursive, so a
//! partial override of a nested object (`callToActionOption`,
//! `timerTextOption`, ...) keeps every sibling key it does not mention.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target device of a compile or mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Desktop,
    Mobile,
}

impl Device {
    pub fn from_mobile_flag(mobile: bool) -> Self {
        if mobile {
            Device::Mobile
        } else {
            Device::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Device::Mobile)
    }
}

/// Overlay `overrides` on top of `base`, key by key.
///
/// A `null` override means "inherit" and never blanks out the base value.
pub fn merge_settings(base: &Map<String, Value>, overrides: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut merged = base.clone();
    if let Some(overrides) = overrides {
        overlay(&mut merged, overrides);
    }
    merged
}

fn overlay(target: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        if value.is_null() {
            continue;
        }
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => overlay(existing, nested),
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
