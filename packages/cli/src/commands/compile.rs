use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use notify::{Config as WatchConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use slidebar_compiler::{
    attach_layout, collect_font_families, compile_slide, google_fonts_url, render_document,
    CompileOptions, RenderOptions,
};
use slidebar_model::CampaignConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Campaign file or directory (defaults to the configured campaigns dir)
    pub path: Option<PathBuf>,

    /// Target format (json, html)
    #[arg(short, long, default_value = "json")]
    pub target: String,

    /// Render the mobile layout (html target)
    #[arg(long)]
    pub mobile: bool,

    /// Compile as of this instant (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Watch for file changes
    #[arg(short, long)]
    pub watch: bool,
}

pub fn compile(args: CompileArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.path {
        Some(path) => cwd.join(path),
        None => config.campaigns_dir(cwd),
    };

    if !input.exists() {
        return Err(anyhow!("Input does not exist: {}", input.display()));
    }

    println!("{}", "🔨 Compiling campaigns...".bright_blue().bold());
    compile_all(&input, &args, &config, cwd)?;

    if args.watch {
        watch(&input, &args, &config, cwd)?;
    }
    Ok(())
}

fn compile_all(input: &Path, args: &CompileArgs, config: &Config, cwd: &Path) -> Result<()> {
    let files = find_campaign_files(input);
    if files.is_empty() {
        println!("{}", "⚠️  No campaign files found".yellow());
        return Ok(());
    }
    println!("Found {} files", files.len());

    let mut success_count = 0;
    let mut error_count = 0;
    for file in &files {
        let relative = file.strip_prefix(input).unwrap_or(file);
        match compile_file(file, args, config, cwd) {
            Ok(output) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), relative.display(), output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative.display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} campaigns successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Compiled {} campaigns, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }
    Ok(())
}

fn find_campaign_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| is_campaign_file(path))
        .collect()
}

fn is_campaign_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

fn compile_file(file: &Path, args: &CompileArgs, config: &Config, cwd: &Path) -> Result<String> {
    let source = fs::read_to_string(file)?;
    let output = compile_source(&source, args, config)
        .with_context(|| format!("Failed to compile {}", file.display()))?;

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let out_dir = match &args.out_dir {
        Some(out) => cwd.join(out),
        None => config.out_dir(cwd),
    };
    let extension = match args.target.as_str() {
        "html" => "html",
        _ => "json",
    };
    let name = file
        .file_name()
        .ok_or_else(|| anyhow!("Not a file: {}", file.display()))?;
    let output_file = out_dir.join(name).with_extension(extension);
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;
    Ok(output_file.display().to_string())
}

/// Compile one campaign source to the requested target
pub fn compile_source(source: &str, args: &CompileArgs, config: &Config) -> Result<String> {
    let campaign = CampaignConfig::from_json(source)?;
    let options = CompileOptions::at(args.at.unwrap_or_else(Utc::now))
        .with_host_id(config.engine.host_id.clone())
        .with_asset_base_url(config.engine.asset_base_url.clone());
    debug!(slides = campaign.slide_count(), target = %args.target, "Compiling campaign");

    match args.target.as_str() {
        "json" => {
            let mut campaign = campaign;
            attach_layout(&mut campaign, &options)?;
            Ok(campaign.to_json()?)
        }
        "html" => {
            let trees = (0..campaign.slide_count())
                .map(|index| compile_slide(&campaign, index, args.mobile, &options))
                .collect::<Result<Vec<_>, _>>()?;
            let slides: Vec<_> = trees.iter().collect();
            let font_url = google_fonts_url(&config.engine.fonts_base_url, &collect_font_families(&campaign));
            let render = RenderOptions {
                mobile: args.mobile,
                ..RenderOptions::default()
            };
            Ok(render_document(
                &config.engine.host_id,
                &slides,
                font_url.as_deref(),
                None,
                &render,
            ))
        }
        other => Err(anyhow!("Unknown target: {}", other)),
    }
}

fn watch(input: &Path, args: &CompileArgs, config: &Config, cwd: &Path) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        WatchConfig::default(),
    )?;
    watcher.watch(input, RecursiveMode::Recursive)?;

    println!("\n{}", "👀 Watching for changes...".bright_blue());
    info!(path = %input.display(), "Watching campaigns");

    for res in rx {
        let event: Event = match res {
            Ok(event) => event,
            Err(e) => {
                eprintln!("  {} {}", "✗".red(), e);
                continue;
            }
        };
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            continue;
        }
        for path in event.paths.iter().filter(|path| is_campaign_file(path)) {
            match compile_file(path, args, config, cwd) {
                Ok(output) => println!("  {} {} → {}", "↻".cyan(), path.display(), output),
                Err(e) => eprintln!("  {} {} - {}", "✗".red(), path.display(), e.to_string().red()),
            }
        }
    }
    Ok(())
}
