//! # Slide Engine
//!
//! One engine hosts one campaign on a [`Page`]. All state of a mount lives in
//! the engine, so several campaigns can share a page without cross-talk.
//!
//! ## Mount pipeline
//!
//! ```text
//! unmount previous ─▶ compile ─▶ materialize ─▶ measure ─▶ place
//!                                                            │
//!        cart total ◀─ countdowns ◀─ animation ◀─ fonts ◀────┘
//! ```
//!
//! ## Teardown
//!
//! [`SlideEngine::unmount`] is the only cleanup path and is safe to call at
//! any point, any number of times: it cancels every timer the engine owns,
//! strips link targets, removes every node the engine inserted and restores
//! the `top` of headers it moved.

use crate::animation::{
    fill_ring, fill_track, speed_px_per_sec, Animation, Direction, Marquee, MultiRotating,
    Rotating, SlideBuffer, Transition, ACTIVE,
};
use crate::behavior::{Behavior, Behaviors};
use crate::cart::{CartSource, UnavailableCart};
use crate::config::EngineConfig;
use crate::dom::{Document, NodeId};
use crate::error::{EngineError, EngineResult};
use crate::events::SlideEvent;
use crate::host::{self, PlaceRequest, Placement};
use crate::layout::Layout;
use crate::materialize::{renumber_style_rules, Materializer};
use crate::page::Page;
use crate::scheduler::{Fired, OwnerId, TimerId, TimerSet};
use crate::widgets::countdown::{CountdownWidget, TickOutcome, TICK_MS};
use crate::widgets::{clipboard, notification, quantity, shipping};
use slidebar_compiler::css::{marquee_css, StyleRule};
use slidebar_compiler::{
    collect_font_families, compile_slide, google_fonts_url, CompileOptions, PreviewTarget,
};
use slidebar_model::{AnimationType, CampaignConfig, SlideType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Work a timer carries back to its engine
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    RotateTick,
    MultiTick,
    /// Remove transient animation classes
    StripClasses {
        node: NodeId,
        classes: Vec<&'static str>,
    },
    CountdownTick {
        clock: NodeId,
    },
    NotificationFade {
        toast: NodeId,
    },
    NotificationRemove {
        toast: NodeId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    /// Force a device instead of deciding from the viewport width
    pub mobile: Option<bool>,
    /// Sub-message the editor wants to see, e.g. `goalMessage`
    pub preview_selector: Option<String>,
    /// Insert under this node instead of the body
    pub root: Option<NodeId>,
    /// Mounted inside the admin editor
    pub admin_preview: bool,
}

impl MountOptions {
    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = Some(mobile);
        self
    }

    pub fn preview_selector(mut self, selector: impl Into<String>) -> Self {
        self.preview_selector = Some(selector.into());
        self
    }

    pub fn root(mut self, root: NodeId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn admin_preview(mut self) -> Self {
        self.admin_preview = true;
        self
    }
}

/// Everything one mount put on the page
#[derive(Debug)]
struct Mounted {
    /// Node inserted into the page; the host itself or the marquee viewport
    outer: NodeId,
    /// Element carrying the host id, parent of the slides
    host: NodeId,
    mobile: bool,
    originals: Vec<NodeId>,
    slides: Vec<NodeId>,
    placement: Placement,
    animation: Animation,
    autoplay: Option<TimerId>,
    clocks: Vec<NodeId>,
    countdowns: HashMap<NodeId, CountdownWidget>,
    shipping_bars: Vec<NodeId>,
    style_rules: Vec<(NodeId, StyleRule)>,
    font_link: Option<NodeId>,
    marquee_style: Option<NodeId>,
    toasts: Vec<NodeId>,
    height: f64,
}

pub struct SlideEngine {
    owner: OwnerId,
    config: EngineConfig,
    timers: TimerSet,
    behaviors: Behaviors,
    events: Vec<SlideEvent>,
    cart: Box<dyn CartSource>,
    mounted: Option<Mounted>,
}

impl SlideEngine {
    pub fn new(config: EngineConfig) -> Self {
        let owner = OwnerId(NEXT_OWNER.fetch_add(1, Ordering::Relaxed));
        Self {
            owner,
            config,
            timers: TimerSet::new(owner),
            behaviors: Behaviors::new(),
            events: Vec::new(),
            cart: Box::new(UnavailableCart),
            mounted: None,
        }
    }

    pub fn with_cart(mut self, cart: impl CartSource + 'static) -> Self {
        self.cart = Box::new(cart);
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Element carrying the host id
    pub fn host(&self) -> Option<NodeId> {
        self.mounted.as_ref().map(|mounted| mounted.host)
    }

    /// Node inserted into the page
    pub fn outer(&self) -> Option<NodeId> {
        self.mounted.as_ref().map(|mounted| mounted.outer)
    }

    /// Mounted slides, duplicates included, in DOM order
    pub fn slides(&self) -> &[NodeId] {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.slides.as_slice())
            .unwrap_or(&[])
    }

    pub fn slide_height(&self) -> Option<f64> {
        self.mounted.as_ref().map(|mounted| mounted.height)
    }

    pub fn is_mobile(&self) -> Option<bool> {
        self.mounted.as_ref().map(|mounted| mounted.mobile)
    }

    pub fn current_slide(&self) -> Option<usize> {
        self.mounted
            .as_ref()
            .and_then(|mounted| mounted.animation.current())
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.mounted.as_ref().map(|mounted| &mounted.animation)
    }

    pub fn marquee(&self) -> Option<&Marquee> {
        match self.animation() {
            Some(Animation::Marquee(marquee)) => Some(marquee),
            _ => None,
        }
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.mounted.as_ref().map(|mounted| &mounted.placement)
    }

    pub fn font_link(&self) -> Option<NodeId> {
        self.mounted.as_ref().and_then(|mounted| mounted.font_link)
    }

    /// Clocks with a running countdown
    pub fn countdowns(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.countdowns.len())
            .unwrap_or(0)
    }

    pub fn shipping_bars(&self) -> &[NodeId] {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.shipping_bars.as_slice())
            .unwrap_or(&[])
    }

    /// Timers this engine still owns
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn take_events(&mut self) -> Vec<SlideEvent> {
        std::mem::take(&mut self.events)
    }

    /// Compile, materialize, place and start a campaign. Any previous mount
    /// of this engine is torn down first.
    #[instrument(skip_all, fields(owner = self.owner.0, host = %self.config.host_id))]
    pub fn mount(
        &mut self,
        page: &mut Page,
        campaign: &CampaignConfig,
        options: MountOptions,
    ) -> EngineResult<()> {
        self.unmount(page);

        let root = options.root.unwrap_or_else(|| page.document.body());
        if !page.document.is_connected(root) {
            return Err(EngineError::DetachedRoot(root.index()));
        }
        let count = campaign.slide_count();
        if count == 0 {
            return Err(EngineError::NoSlides);
        }

        let mobile = options
            .mobile
            .unwrap_or_else(|| self.config.is_mobile_viewport(page.viewport_width));
        let compile_options = CompileOptions::at(page.now())
            .with_host_id(self.config.host_id.clone())
            .with_asset_base_url(self.config.asset_base_url.clone())
            .with_preview(PreviewTarget::from_selector(options.preview_selector.as_deref()));
        let mut trees = Vec::with_capacity(count);
        for index in 0..count {
            trees.push(compile_slide(campaign, index, mobile, &compile_options)?);
        }

        let doc = &mut page.document;
        let host = doc.create_element("div");
        doc.set_attr(host, "id", &self.config.host_id);

        let mut slides = Vec::with_capacity(count);
        let mut clocks = Vec::new();
        let mut shipping_bars = Vec::new();
        let mut style_rules = Vec::new();
        for (index, tree) in trees.iter().enumerate() {
            let out = Materializer::new(doc, &mut self.behaviors, mobile)
                .slide_number(index + 1)
                .build(tree);
            if let Some(slide) = out.root {
                doc.append_child(host, slide);
                slides.push(slide);
            }
            clocks.extend(out.clocks);
            shipping_bars.extend(out.shipping_bars);
            style_rules.extend(out.style_rules);
        }

        let outer = if campaign.animation_type == AnimationType::Marquee {
            let viewport = doc.create_element("div");
            doc.set_attr(viewport, "class", "ab-marquee-viewport");
            doc.set_style(viewport, "position", "relative");
            doc.set_style(viewport, "overflow", "hidden");
            doc.set_style(host, "display", "flex");
            doc.set_style(host, "width", "max-content");
            doc.append_child(viewport, host);
            viewport
        } else {
            host
        };

        let height = self.measure_height(page, &slides, mobile, &campaign.slide_type);
        let request = PlaceRequest {
            position: campaign.slide_position.clone(),
            slide_type: campaign.slide_type.clone(),
            custom_selector: campaign.custom_selector.clone(),
            root,
            height,
            admin_panel_width: options.admin_preview.then_some(self.config.admin_panel_width),
        };
        let placement = host::place(&mut page.document, outer, &request);

        let families = collect_font_families(campaign);
        let font_link = google_fonts_url(&self.config.fonts_base_url, &families).map(|url| {
            let doc = &mut page.document;
            let link = doc.create_element("link");
            doc.set_attr(link, "rel", "stylesheet");
            doc.set_attr(link, "href", &url);
            let head = doc.head();
            doc.append_child(head, link);
            link
        });

        self.mounted = Some(Mounted {
            outer,
            host,
            mobile,
            originals: slides.clone(),
            slides,
            placement,
            animation: Animation::Still,
            autoplay: None,
            clocks,
            countdowns: HashMap::new(),
            shipping_bars,
            style_rules,
            font_link,
            marquee_style: None,
            toasts: Vec::new(),
            height,
        });

        self.start_animation(page, campaign);
        self.start_countdowns(page);
        self.refresh_cart(page);

        info!(
            slides = count,
            mobile,
            height,
            position = %campaign.slide_position,
            animation = %campaign.animation_type,
            "Mounted campaign"
        );
        Ok(())
    }

    /// Tallest slide when laid out inside an invisible probe at the width of
    /// the target device class
    fn measure_height(&self, page: &mut Page, slides: &[NodeId], mobile: bool, slide_type: &SlideType) -> f64 {
        let width = if *slide_type == SlideType::Embeded {
            self.config.probe_widths.embedded
        } else if mobile {
            self.config.probe_widths.mobile
        } else {
            self.config.probe_widths.desktop
        };

        let doc = &mut page.document;
        let mut height: f64 = 0.0;
        for slide in slides {
            let probe = doc.create_element("div");
            doc.set_style(probe, "position", "absolute");
            doc.set_style(probe, "visibility", "hidden");
            doc.set_style(probe, "left", "-9999px");
            doc.set_style(probe, "width", &format!("{}px", width));
            let (copy, _) = doc.clone_subtree(*slide);
            doc.append_child(probe, copy);
            let body = doc.body();
            doc.append_child(body, probe);

            height = height.max(page.layout.client_height(doc, copy, width));
            doc.remove(probe);
        }
        debug!(height, width, "Measured slide height");
        height
    }

    fn start_animation(&mut self, page: &mut Page, campaign: &CampaignConfig) {
        let mounted = match self.mounted.as_mut() {
            Some(mounted) => mounted,
            None => return,
        };
        let animation_ms = campaign.text_animation_time.max(0.0) as u64;
        let autoplay_ms = campaign.autoplay_time.max(0.0) as u64;
        let original = mounted.originals.len();

        mounted.animation = match campaign.animation_type {
            AnimationType::Marquee => {
                let viewport_width = page.viewport_width;
                let metrics = {
                    let mut buffer = MountedSlides {
                        doc: &mut page.document,
                        layout: &*page.layout,
                        behaviors: &mut self.behaviors,
                        mounted: &mut *mounted,
                    };
                    fill_track(&mut buffer, viewport_width)
                };
                match metrics {
                    Some(metrics) => {
                        let speed = speed_px_per_sec(
                            campaign.marquee_speed,
                            metrics.slide_width,
                            campaign.text_animation_time,
                        );
                        let marquee = Marquee::new(metrics, speed);
                        let doc = &mut page.document;
                        let style = doc.create_element("style");
                        let css = marquee_css(
                            &self.config.host_id,
                            metrics.translate_percent(),
                            marquee.duration_secs,
                        );
                        let text = doc.create_text(&css);
                        doc.append_child(style, text);
                        let head = doc.head();
                        doc.append_child(head, style);
                        mounted.marquee_style = Some(style);
                        Animation::Marquee(marquee)
                    }
                    None => Animation::Still,
                }
            }
            AnimationType::MultiRotating => {
                {
                    let mut buffer = MountedSlides {
                        doc: &mut page.document,
                        layout: &*page.layout,
                        behaviors: &mut self.behaviors,
                        mounted: &mut *mounted,
                    };
                    fill_ring(&mut buffer, original);
                }
                let doc = &mut page.document;
                let mut multi =
                    MultiRotating::new(doc, mounted.slides.clone(), original, animation_ms, autoplay_ms);
                let (prev, next) = multi.add_arrows(doc, mounted.host);
                self.behaviors.attach(prev, Behavior::Navigate(Direction::Prev));
                self.behaviors.attach(next, Behavior::Navigate(Direction::Next));
                mounted.autoplay =
                    Some(self.timers.interval(&mut page.scheduler, multi.period_ms(), Task::MultiTick));
                Animation::Multi(multi)
            }
            _ => {
                let rotating = Rotating::new(&mut page.document, mounted.slides.clone(), animation_ms, autoplay_ms);
                match rotating.period_ms() {
                    Some(period) => {
                        mounted.autoplay =
                            Some(self.timers.interval(&mut page.scheduler, period, Task::RotateTick));
                        Animation::Rotating(rotating)
                    }
                    None => Animation::Still,
                }
            }
        };

        if mounted.slides.len() > original {
            renumber_style_rules(&mut page.document, mounted.host, &mounted.style_rules);
        }
        debug!(
            animation = mounted.animation.name(),
            slides = mounted.slides.len(),
            "Started animation"
        );
    }

    fn start_countdowns(&mut self, page: &mut Page) {
        let mounted = match self.mounted.as_mut() {
            Some(mounted) => mounted,
            None => return,
        };
        let now = page.now();
        for clock in mounted.clocks.clone() {
            let widget = match CountdownWidget::attach(&page.document, clock) {
                Some(widget) => widget,
                None => {
                    warn!(clock = clock.index(), "Clock without schedule, not ticking");
                    continue;
                }
            };
            widget.render(&mut page.document, now);
            self.timers
                .interval(&mut page.scheduler, TICK_MS, Task::CountdownTick { clock });
            mounted.countdowns.insert(clock, widget);
        }
    }

    /// Fetch the cart total once and update every shipping bar
    fn refresh_cart(&mut self, page: &mut Page) {
        if self.shipping_bars().is_empty() {
            return;
        }
        if !self.config.environment.fetches_cart() {
            debug!(environment = %self.config.environment, "Skipping cart fetch");
            return;
        }
        match self.cart.fetch_total() {
            Ok(total) => {
                self.apply_cart_total(page, total.original_total_price);
            }
            Err(err) => warn!(%err, "Cart total unavailable, shipping text unchanged"),
        }
    }

    /// Recompute every shipping bar for a cart total in cents; returns how
    /// many bars were updated
    pub fn apply_cart_total(&mut self, page: &mut Page, cents: i64) -> usize {
        let bars = self.shipping_bars().to_vec();
        let value = cents as f64 / 100.0;
        let mut updated = 0;
        for bar in bars {
            if page.document.is_connected(bar)
                && shipping::apply_cart_value(&mut page.document, bar, value).is_some()
            {
                updated += 1;
            }
        }
        debug!(value, updated, "Applied cart total");
        updated
    }

    /// Run a fired timer of this engine
    pub fn on_timer(&mut self, page: &mut Page, fired: Fired<Task>) {
        if self.mounted.is_none() {
            page.scheduler.clear(fired.id);
            return;
        }

        match fired.task {
            Task::RotateTick | Task::MultiTick => {
                if !self.host_attached(&page.document) {
                    warn!("Slide host is gone, tearing down");
                    self.unmount(page);
                    return;
                }
                let transition = self.mounted.as_mut().and_then(|mounted| match &mut mounted.animation {
                    Animation::Rotating(rotating) => rotating.tick(&mut page.document),
                    Animation::Multi(multi) => multi.navigate(&mut page.document, Direction::Next),
                    _ => None,
                });
                self.schedule_cleanups(page, transition);
            }
            Task::StripClasses { node, classes } => {
                for class in classes {
                    page.document.remove_class(node, class);
                }
            }
            Task::CountdownTick { clock } => {
                let now = page.now();
                let outcome = self
                    .mounted
                    .as_ref()
                    .and_then(|mounted| mounted.countdowns.get(&clock))
                    .map(|widget| widget.tick(&mut page.document, now));
                match outcome {
                    Some(TickOutcome::Running) => {}
                    // Expired clocks stay at zero and stop ticking
                    _ => {
                        self.timers.cancel(&mut page.scheduler, fired.id);
                        if let Some(mounted) = self.mounted.as_mut() {
                            mounted.countdowns.remove(&clock);
                        }
                    }
                }
            }
            Task::NotificationFade { toast } => {
                notification::fade(&mut page.document, toast, &self.config.notification);
            }
            Task::NotificationRemove { toast } => {
                notification::dismiss(&mut page.document, toast);
                if let Some(mounted) = self.mounted.as_mut() {
                    mounted.toasts.retain(|node| *node != toast);
                }
            }
        }
        self.timers.prune(&page.scheduler);
    }

    fn host_attached(&self, doc: &Document) -> bool {
        match &self.mounted {
            Some(mounted) => {
                doc.is_connected(mounted.host)
                    && doc.id_of(mounted.host) == Some(self.config.host_id.as_str())
            }
            None => false,
        }
    }

    fn schedule_cleanups(&mut self, page: &mut Page, transition: Option<Transition>) {
        if let Some(transition) = transition {
            for (delay, node, classes) in transition.cleanups {
                self.timers
                    .timeout(&mut page.scheduler, delay, Task::StripClasses { node, classes });
            }
        }
    }

    /// Manual prev/next for multi-rotating campaigns. Autoplay restarts from
    /// the click, it is not paused.
    pub fn navigate(&mut self, page: &mut Page, direction: Direction) -> bool {
        let mounted = match self.mounted.as_mut() {
            Some(mounted) => mounted,
            None => return false,
        };
        let multi = match &mut mounted.animation {
            Animation::Multi(multi) => multi,
            _ => return false,
        };
        let transition = multi.navigate(&mut page.document, direction);
        let slide = multi.original_index();
        let period = multi.period_ms();

        if let Some(autoplay) = mounted.autoplay.take() {
            self.timers.cancel(&mut page.scheduler, autoplay);
        }
        mounted.autoplay = Some(self.timers.interval(&mut page.scheduler, period, Task::MultiTick));

        self.schedule_cleanups(page, transition);
        self.events.push(SlideEvent::Navigated { direction, slide });
        true
    }

    /// Dispatch a click on `target` through its ancestors. Returns whether
    /// any behaviour ran.
    pub fn click(&mut self, page: &mut Page, target: NodeId) -> bool {
        let outer = match self.outer() {
            Some(outer) => outer,
            None => return false,
        };
        if !page.document.contains(outer, target) {
            return false;
        }

        let mut path = vec![target];
        path.extend(page.document.ancestors(target));
        let mut handled = false;
        for node in path {
            let behaviors = self.behaviors.get(node).to_vec();
            let mut stop = false;
            for behavior in behaviors {
                handled = true;
                match behavior {
                    Behavior::CopyText { text } => self.copy_text(page, &text),
                    Behavior::StopPropagation => stop = true,
                    Behavior::QuantityStep { input, delta } => {
                        quantity::step(&mut page.document, input, delta);
                    }
                    Behavior::Navigate(direction) => {
                        self.navigate(page, direction);
                    }
                    Behavior::Submit => self.submit(page, node),
                    Behavior::AddToCart => self.add_to_cart(page, node),
                    Behavior::Dismiss => {
                        self.events.push(SlideEvent::Dismissed);
                        self.unmount(page);
                    }
                    Behavior::Link { href, new_tab } => {
                        self.events.push(SlideEvent::Click { href, new_tab });
                    }
                }
                if !self.is_mounted() {
                    return true;
                }
            }
            if stop || node == outer {
                break;
            }
        }
        handled
    }

    fn copy_text(&mut self, page: &mut Page, text: &str) {
        if !clipboard::copy_text(&mut page.document, &mut page.clipboard, text) {
            return;
        }
        self.events.push(SlideEvent::Copied {
            text: text.to_string(),
        });

        let timings = self.config.notification.clone();
        let toast = notification::show(&mut page.document, &self.config.copied_message, &timings);
        self.timers
            .timeout(&mut page.scheduler, timings.visible_ms, Task::NotificationFade { toast });
        self.timers.timeout(
            &mut page.scheduler,
            timings.visible_ms + timings.fade_ms,
            Task::NotificationRemove { toast },
        );
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.toasts.push(toast);
        }
    }

    /// Email bar submit: report the address and switch to the success view
    fn submit(&mut self, page: &mut Page, button: NodeId) {
        let doc = &mut page.document;
        let bar = match enclosing(doc, button, "ab-slide-email") {
            Some(bar) => bar,
            None => return,
        };
        let input = doc.query_selector(bar, "input[type=email]");
        let email = input
            .and_then(|input| doc.attr(input, "value"))
            .unwrap_or_default()
            .trim()
            .to_string();
        let required = input
            .map(|input| doc.attr(input, "required").is_some())
            .unwrap_or(false);
        if required && email.is_empty() {
            debug!("Email required, ignoring submit");
            return;
        }

        if let Some(slide) = enclosing(doc, bar, "ab-slide") {
            show_success(doc, slide);
        }
        info!("Email bar submitted");
        self.events.push(SlideEvent::Submit { email });
    }

    fn add_to_cart(&mut self, page: &mut Page, button: NodeId) {
        let doc = &page.document;
        let bar = match enclosing(doc, button, "ab-slide-cart") {
            Some(bar) => bar,
            None => return,
        };
        let variant = doc.query_selector(bar, "select").and_then(|select| {
            let options = doc.query_selector_all(select, "option");
            options
                .iter()
                .find(|option| doc.attr(**option, "selected").is_some())
                .or_else(|| options.first())
                .and_then(|option| doc.attr(*option, "value"))
                .map(str::to_string)
        });
        let quantity = doc
            .find_by_class(bar, "ab-qty-input")
            .first()
            .map(|input| quantity::read_quantity(doc, *input))
            .unwrap_or(quantity::MIN_QUANTITY);

        debug!(?variant, quantity, "Add to cart");
        self.events.push(SlideEvent::AddToCart { variant, quantity });
    }

    /// Re-offset fixed headers after the page scrolled
    pub fn on_scroll(&mut self, page: &mut Page) {
        if let Some(mounted) = self.mounted.as_mut() {
            host::offset_headers(
                &mut page.document,
                &mut mounted.placement,
                mounted.outer,
                mounted.height,
            );
        }
    }

    /// Tear down everything this engine put on the page
    pub fn unmount(&mut self, page: &mut Page) {
        self.timers.clear_all(&mut page.scheduler);
        let mut mounted = match self.mounted.take() {
            Some(mounted) => mounted,
            None => return,
        };

        let doc = &mut page.document;
        for link in doc.query_selector_all(mounted.outer, "a") {
            doc.remove_attr(link, "href");
        }
        doc.remove(mounted.outer);
        for node in mounted
            .font_link
            .into_iter()
            .chain(mounted.marquee_style)
            .chain(mounted.toasts.drain(..))
        {
            doc.remove(node);
        }
        host::restore_headers(doc, &mut mounted.placement);
        self.behaviors.clear();
        info!(owner = self.owner.0, "Unmounted campaign");
    }
}

/// Closest inclusive ancestor carrying `class`
fn enclosing(doc: &Document, node: NodeId, class: &str) -> Option<NodeId> {
    std::iter::once(node)
        .chain(doc.ancestors(node))
        .find(|candidate| doc.has_class(*candidate, class))
}

/// Swap the active content of a slide for its `.email-success` view
fn show_success(doc: &mut Document, slide: NodeId) {
    let success = match doc.find_by_class(slide, "email-success").first().copied() {
        Some(success) => success,
        None => return,
    };
    for content in doc.find_by_class(slide, "ab-slide-content") {
        if content != success {
            doc.remove_class(content, ACTIVE);
            doc.set_style(content, "display", "none");
        }
    }
    doc.add_class(success, ACTIVE);
    doc.remove_style(success, "display");
}

/// Mounted slides seen through [`SlideBuffer`]; duplicating a set clones
/// each original slide with its behaviours, clocks, shipping bars and rules
struct MountedSlides<'a> {
    doc: &'a mut Document,
    layout: &'a dyn Layout,
    behaviors: &'a mut Behaviors,
    mounted: &'a mut Mounted,
}

impl SlideBuffer for MountedSlides<'_> {
    fn len(&self) -> usize {
        self.mounted.slides.len()
    }

    fn width(&self) -> f64 {
        self.layout.offset_width(&*self.doc, self.mounted.host)
    }

    fn duplicate_set(&mut self) {
        for original in self.mounted.originals.clone() {
            let (copy, pairs) = self.doc.clone_subtree(original);
            self.doc.remove_class(copy, ACTIVE);
            self.doc.append_child(self.mounted.host, copy);
            self.behaviors.copy_to_clones(&pairs);

            for (source, clone) in &pairs {
                if self.mounted.clocks.contains(source) {
                    self.mounted.clocks.push(*clone);
                }
                if self.mounted.shipping_bars.contains(source) {
                    self.mounted.shipping_bars.push(*clone);
                }
                let rule = self
                    .mounted
                    .style_rules
                    .iter()
                    .find(|(style, _)| style == source)
                    .map(|(_, rule)| rule.clone());
                if let Some(rule) = rule {
                    self.mounted.style_rules.push((*clone, rule));
                }
            }
            self.mounted.slides.push(copy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn page() -> Page {
        Page::new(1280.0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn campaign(json: &str) -> CampaignConfig {
        CampaignConfig::from_json(json).expect("Failed to parse campaign")
    }

    #[test]
    fn test_owners_are_unique() {
        let a = SlideEngine::new(EngineConfig::default());
        let b = SlideEngine::new(EngineConfig::default());
        assert_ne!(a.owner(), b.owner());
    }

    #[test]
    fn test_mount_then_unmount_is_clean() {
        let mut page = page();
        let mut engine = SlideEngine::new(EngineConfig::default());
        let config = campaign(
            r#"{"htmlDesign":[{"id":"t1","type":"Text","desktopSetting":{"text":"Hello"}}]}"#,
        );
        engine
            .mount(&mut page, &config, MountOptions::default())
            .expect("Failed to mount");
        let host = engine.host().expect("Failed to get host");
        assert!(page.document.is_connected(host));
        assert_eq!(page.document.id_of(host), Some("announcement-bar-with-slider"));

        engine.unmount(&mut page);
        engine.unmount(&mut page);
        assert!(!page.document.is_connected(host));
        assert!(!engine.is_mounted());
    }

    #[test]
    fn test_detached_root_is_rejected() {
        let mut page = page();
        let mut engine = SlideEngine::new(EngineConfig::default());
        let loose = page.document.create_element("div");
        let config = campaign(r#"{"htmlDesign":[]}"#);
        let result = engine.mount(&mut page, &config, MountOptions::default().root(loose));
        assert!(matches!(result, Err(EngineError::DetachedRoot(_))));
    }
}
