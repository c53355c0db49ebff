use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Campaigns directory
    #[arg(short, long, default_value = "campaigns")]
    pub campaigns_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_CAMPAIGN: &str = r##"{
  "id": "example",
  "slidePosition": "static",
  "animationType": "rotating",
  "autoplayTime": 3000,
  "textAnimationTime": 1000,
  "slides": [
    {
      "backgroundColor": "#1f2937",
      "htmlDesign": [
        { "id": "headline", "type": "Text", "desktopSetting": { "text": "Summer sale ends in", "textColor": "#ffffff", "fontSize": "16px" } },
        { "id": "clock", "type": "Clock", "desktopSetting": { "timerType": "repeated", "repeatedTimer": { "repeatedHours": 24, "repeatTimerCreateDate": "2024-01-01T00:00:00Z" } } }
      ]
    },
    {
      "backgroundColor": "#111827",
      "htmlDesign": [
        { "id": "shipping", "type": "freeShippingBar", "desktopSetting": {
          "progressStartMsg": "Only", "progressEndMsg": "away from free shipping",
          "goalMsg": "You unlocked free shipping!", "shippingPrice": 50, "currency": "$"
        } },
        { "id": "coupon", "type": "Button", "desktopSetting": {
          "btnName": "Copy SUMMER10", "couponCode": "SUMMER10",
          "callToActionOption": { "buttonType": "btnCoupon" }
        } }
      ]
    }
  ]
}
"##;

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing slidebar project...".bright_blue().bold());

    let campaigns_dir = cwd.join(&args.campaigns_dir);
    if !campaigns_dir.exists() {
        fs::create_dir_all(&campaigns_dir)?;
        println!("  {} Created {}/", "✓".green(), args.campaigns_dir);
    }

    let example_file = campaigns_dir.join("example.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_CAMPAIGN)?;
        println!("  {} Created example.json", "✓".green());
    }

    let config = Config {
        campaigns_dir: args.campaigns_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/example.json", args.campaigns_dir);
    println!("  2. Run: slidebar compile --target html");
    println!("  3. Run: slidebar preview {}/example.json", args.campaigns_dir);

    Ok(())
}
