//! Simulated storefront mount: runs the engine against an in-memory page on
//! a virtual clock and prints what the shopper would end up seeing.

use crate::config::Config;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use slidebar_model::CampaignConfig;
use slidebar_runtime::{MountOptions, Page, SlideEngine, StaticCart};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Campaign file
    pub campaign: PathBuf,

    /// Force the mobile layout
    #[arg(long)]
    pub mobile: bool,

    /// Viewport width in pixels (overrides config)
    #[arg(long)]
    pub width: Option<f64>,

    /// Milliseconds of virtual time to run after mounting
    #[arg(long, default_value = "0")]
    pub run_ms: u64,

    /// Cart total in cents fed to shipping bars
    #[arg(long)]
    pub cart_cents: Option<i64>,

    /// Page clock start (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Print the host page markup
    #[arg(long)]
    pub html: bool,
}

/// What a simulated mount left on the page
#[derive(Debug)]
pub struct PreviewReport {
    pub animation: &'static str,
    pub slides: usize,
    pub current: Option<usize>,
    pub height: f64,
    pub mobile: bool,
    pub pending_timers: usize,
    pub html: String,
}

pub fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.campaign);
    let source = fs::read_to_string(&path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    let campaign = CampaignConfig::from_json(&source)?;

    println!(
        "{} {}",
        "🖥  Previewing".bright_blue().bold(),
        path.display()
    );
    let report = simulate(&campaign, &args, &config)?;

    println!("  animation: {}", report.animation.bright_white());
    println!("  slides:    {}", report.slides);
    if let Some(current) = report.current {
        println!("  current:   {}", current);
    }
    println!("  height:    {}px", report.height);
    println!("  device:    {}", if report.mobile { "mobile" } else { "desktop" });
    println!("  timers:    {}", report.pending_timers);
    if args.html {
        println!();
        println!("{}", report.html);
    }
    Ok(())
}

/// Mount `campaign` on a fresh page, run the clock and tear down again
pub fn simulate(campaign: &CampaignConfig, args: &PreviewArgs, config: &Config) -> Result<PreviewReport> {
    let width = args.width.unwrap_or(config.viewport_width);
    let mut page = Page::new(width, args.at.unwrap_or_else(Utc::now));
    let mut engine = SlideEngine::new(config.engine.clone());
    if let Some(cents) = args.cart_cents {
        engine = engine.with_cart(StaticCart::new(cents));
    }

    let mut options = MountOptions::default();
    if args.mobile {
        options = options.mobile(true);
    }
    engine.mount(&mut page, campaign, options)?;
    if args.run_ms > 0 {
        page.run(args.run_ms, &mut [&mut engine]);
    }

    let body = page.document.body();
    let report = PreviewReport {
        animation: engine.animation().map(|animation| animation.name()).unwrap_or("none"),
        slides: engine.slides().len(),
        current: engine.current_slide(),
        height: engine.slide_height().unwrap_or(0.0),
        mobile: engine.is_mobile().unwrap_or(args.mobile),
        pending_timers: page.scheduler.pending_for(engine.owner()),
        html: page.document.outer_html(body),
    };
    info!(slides = report.slides, timers = report.pending_timers, "Simulated mount");

    engine.unmount(&mut page);
    Ok(report)
}
