//! Engine configuration.
//!
//! Everything the storefront script would otherwise hard-code: CDN and font
//! endpoints, the deployment environment, measurement widths and toast
//! timings. Loaded from camelCase JSON; every field has a default.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use slidebar_compiler::{DEFAULT_ASSET_BASE_URL, DEFAULT_HOST_ID, GOOGLE_FONTS_BASE};
use std::fmt;

/// Deployment environment; the cart fetch only runs in production
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Development,
}

impl Environment {
    pub fn fetches_cart(self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
        };
        f.write_str(name)
    }
}

/// Widths of the invisible probe used to measure slide height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeWidths {
    pub mobile: f64,
    pub desktop: f64,
    pub embedded: f64,
}

impl Default for ProbeWidths {
    fn default() -> Self {
        Self {
            mobile: 375.0,
            desktop: 1280.0,
            embedded: 480.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationTimings {
    /// Time the toast stays fully visible
    pub visible_ms: u64,
    pub fade_ms: u64,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            visible_ms: 2000,
            fade_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub host_id: String,
    pub asset_base_url: String,
    pub fonts_base_url: String,
    pub environment: Environment,
    /// Viewports narrower than this render the mobile layout
    pub mobile_breakpoint: f64,
    pub probe_widths: ProbeWidths,
    pub notification: NotificationTimings,
    /// Width of the admin side panel a bottom-fixed preview must leave free
    pub admin_panel_width: f64,
    pub copied_message: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host_id: DEFAULT_HOST_ID.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            fonts_base_url: GOOGLE_FONTS_BASE.to_string(),
            environment: Environment::default(),
            mobile_breakpoint: 600.0,
            probe_widths: ProbeWidths::default(),
            notification: NotificationTimings::default(),
            admin_panel_width: 360.0,
            copied_message: "Copied to clipboard".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(source: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_host_id(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = host_id.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn is_mobile_viewport(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint
    }
}
