use chrono::{DateTime, Utc};
use slidebar_model::Device;

pub const DEFAULT_HOST_ID: &str = "announcement-bar-with-slider";
pub const DEFAULT_ASSET_BASE_URL: &str = "https://cdn.slidebar.app/assets";

/// Sub-message the editor wants to preview without reconfiguring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewTarget {
    #[default]
    Default,
    /// Shipping bars render their goal message instead of the progress text
    GoalMessage,
}

impl PreviewTarget {
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("goalMessage") => PreviewTarget::GoalMessage,
            _ => PreviewTarget::Default,
        }
    }
}

/// Options for campaign compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// DOM id of the host container; scopes every generated selector
    pub host_id: String,
    /// Base URL gallery background filenames resolve against
    pub asset_base_url: String,
    /// Reference time for clock expiry and initial digits
    pub now: DateTime<Utc>,
    pub preview: PreviewTarget,
}

impl CompileOptions {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            host_id: DEFAULT_HOST_ID.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            now,
            preview: PreviewTarget::Default,
        }
    }

    pub fn with_host_id(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = host_id.into();
        self
    }

    pub fn with_asset_base_url(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = url.into();
        self
    }

    pub fn with_preview(mut self, preview: PreviewTarget) -> Self {
        self.preview = preview;
        self
    }
}

impl Default for CompileOptions {
    /// Uses the wall clock; pass an explicit time with [`CompileOptions::at`]
    /// when output must be reproducible.
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Per-block compile state
pub(crate) struct BlockContext<'a> {
    pub device: Device,
    pub options: &'a CompileOptions,
    /// Entire-bar-clickable mode is active for this slide
    pub entire: bool,
}
