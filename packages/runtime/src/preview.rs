//! Editor preview adapters.
//!
//! The admin editor re-runs the whole pipeline on every change: an update is
//! a full re-mount, never a patch. Each adapter owns its engines, so a
//! preview closing can never cancel timers of another one.

use crate::config::EngineConfig;
use crate::dom::NodeId;
use crate::engine::{MountOptions, SlideEngine};
use crate::error::EngineResult;
use crate::page::Page;
use slidebar_model::CampaignConfig;
use tracing::debug;

/// One campaign in one preview root
pub struct Preview {
    engine: SlideEngine,
    root: NodeId,
    mobile: bool,
    selector: Option<String>,
}

impl Preview {
    pub fn new(config: EngineConfig, root: NodeId) -> Self {
        Self {
            engine: SlideEngine::new(config),
            root,
            mobile: false,
            selector: None,
        }
    }

    pub fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Switch between desktop and mobile; applies on the next update
    pub fn set_mobile(&mut self, mobile: bool) {
        self.mobile = mobile;
    }

    /// Preview a sub-message such as `goalMessage`; applies on the next update
    pub fn select(&mut self, selector: Option<&str>) {
        self.selector = selector.map(str::to_string);
    }

    /// Re-mount from scratch with the edited campaign
    pub fn update(&mut self, page: &mut Page, campaign: &CampaignConfig) -> EngineResult<()> {
        let mut options = MountOptions::default()
            .mobile(self.mobile)
            .root(self.root)
            .admin_preview();
        if let Some(selector) = &self.selector {
            options = options.preview_selector(selector.clone());
        }
        debug!(mobile = self.mobile, "Updating preview");
        self.engine.mount(page, campaign, options)
    }

    pub fn close(&mut self, page: &mut Page) {
        self.engine.unmount(page);
    }

    pub fn engine(&self) -> &SlideEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SlideEngine {
        &mut self.engine
    }
}

/// The same campaign side by side in a desktop and a mobile frame.
///
/// Both frames use the configured host id; each engine tracks its own host
/// node so the duplicate id does not confuse them.
pub struct DuplicatePreview {
    desktop: Preview,
    mobile: Preview,
}

impl DuplicatePreview {
    pub fn new(config: EngineConfig, desktop_root: NodeId, mobile_root: NodeId) -> Self {
        Self {
            desktop: Preview::new(config.clone(), desktop_root).with_mobile(false),
            mobile: Preview::new(config, mobile_root).with_mobile(true),
        }
    }

    pub fn update(&mut self, page: &mut Page, campaign: &CampaignConfig) -> EngineResult<()> {
        self.desktop.update(page, campaign)?;
        self.mobile.update(page, campaign)
    }

    pub fn close(&mut self, page: &mut Page) {
        self.desktop.close(page);
        self.mobile.close(page);
    }

    pub fn desktop(&self) -> &Preview {
        &self.desktop
    }

    pub fn mobile(&self) -> &Preview {
        &self.mobile
    }

    pub fn engines_mut(&mut self) -> Vec<&mut SlideEngine> {
        vec![self.desktop.engine_mut(), self.mobile.engine_mut()]
    }
}

/// Several campaigns on one page, each under its own host id
/// (`<host id>-<index>`)
pub struct MultiplePreview {
    previews: Vec<Preview>,
}

impl MultiplePreview {
    pub fn new(config: &EngineConfig, roots: &[NodeId]) -> Self {
        let previews = roots
            .iter()
            .enumerate()
            .map(|(index, root)| {
                let host_id = format!("{}-{}", config.host_id, index);
                Preview::new(config.clone().with_host_id(host_id), *root)
            })
            .collect();
        Self { previews }
    }

    /// Mount `campaigns[i]` into preview `i`; previews without a campaign are
    /// closed
    pub fn update(&mut self, page: &mut Page, campaigns: &[CampaignConfig]) -> EngineResult<()> {
        for (index, preview) in self.previews.iter_mut().enumerate() {
            match campaigns.get(index) {
                Some(campaign) => preview.update(page, campaign)?,
                None => preview.close(page),
            }
        }
        Ok(())
    }

    pub fn close(&mut self, page: &mut Page) {
        for preview in &mut self.previews {
            preview.close(page);
        }
    }

    pub fn previews(&self) -> &[Preview] {
        &self.previews
    }

    pub fn engines_mut(&mut self) -> Vec<&mut SlideEngine> {
        self.previews.iter_mut().map(Preview::engine_mut).collect()
    }
}
