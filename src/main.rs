// Care Schedule
// Command-line entry point: JSON schedule in, printable PDF out

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;

use care_schedule::models::settings::LayoutSettings;
use care_schedule::models::shift::ScheduleRequest;
use care_schedule::services::layout::ScheduleLayoutService;
use care_schedule::services::pdf::PdfExportService;
use care_schedule::services::settings::SettingsService;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a care-shift schedule as a printable PDF")]
struct Args {
    /// Schedule request file (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long)]
    output: PathBuf,

    /// Layout settings file (TOML); defaults to the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(args.config)?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read schedule from {}", args.input.display()))?;
    let mut request: ScheduleRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse schedule in {}", args.input.display()))?;
    request
        .validate()
        .map_err(|e| anyhow!("Invalid schedule in {}: {}", args.input.display(), e))?;
    if request.generated_at.is_none() {
        request.generated_at = Some(Local::now().naive_local());
    }

    log::info!(
        "Laying out '{}' with {} shift(s)",
        request.display_title(),
        request.shifts.len()
    );
    let document = ScheduleLayoutService::layout(&request, &settings);
    if document.skipped_shifts > 0 {
        log::warn!(
            "Skipped {} shift(s) with unreadable timestamps",
            document.skipped_shifts
        );
    }

    PdfExportService::export_schedule(&document, &args.output, settings.text_metrics)?;

    println!(
        "Generated {} ({} page(s))",
        args.output.display(),
        document.pages.len()
    );
    Ok(())
}

fn load_settings(path: Option<PathBuf>) -> Result<LayoutSettings> {
    if let Some(path) = path {
        return SettingsService::new(path).get();
    }
    let Some(service) = SettingsService::from_default_location() else {
        log::warn!("No config directory available; using default layout settings");
        return Ok(LayoutSettings::default());
    };
    match service.get() {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::warn!("Ignoring unreadable settings: {:#}", e);
            Ok(LayoutSettings::default())
        }
    }
}
