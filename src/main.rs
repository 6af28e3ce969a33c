#![forbid(unsafe_code)]

mod config;
mod constants;
mod descriptor;
mod display;
mod elevation;
mod encoding;
mod error;
mod privileged;
mod resolution;
mod smoothing;
mod worker;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::Preferences;
use display::{DisplayIdentity, DisplayInfo, list_displays};
use resolution::{NamedResolution, ResolutionSelection};
use worker::{OverrideRequest, OverrideWorker};

/// Enable Retina-style scaled resolutions on displays the system does not
/// cover out of the box. Overrides take effect after a reboot.
#[derive(Parser)]
#[command(name = "hidpi-manager", version, about)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// List attached displays
    List {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a HiDPI override for a display
    Enable {
        /// Display to target: VENDOR:PRODUCT hex pair, or an index from `list`
        display: String,
        /// Resolution choice: a named option (see `resolutions`) or custom
        /// WIDTHxHEIGHT pairs separated by commas or spaces
        #[arg(short, long)]
        resolution: Option<String>,
    },
    /// Remove the HiDPI override for a display
    Disable {
        /// Display to target: VENDOR:PRODUCT hex pair, or an index from `list`
        display: String,
    },
    /// Show the named resolution options and their scaling ladders
    Resolutions,
    /// Read or set the global font smoothing level
    FontSmoothing {
        #[command(subcommand)]
        action: SmoothingAction,
    },
}

#[derive(Subcommand)]
enum SmoothingAction {
    /// Print the current AppleFontSmoothing value
    Get,
    /// Set AppleFontSmoothing (-1 through 3; takes effect after re-login)
    Set {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let preferences = Preferences::load().unwrap_or_default();

    // LOG_LEVEL env var wins over the configured level
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| preferences.log_level.clone())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    match cli.command {
        CliCommand::List { json } => run_list(json)?,
        CliCommand::Enable {
            display,
            resolution,
        } => run_enable(preferences, &display, resolution.as_deref())?,
        CliCommand::Disable { display } => run_disable(&display)?,
        CliCommand::Resolutions => run_resolutions(),
        CliCommand::FontSmoothing { action } => run_font_smoothing(action)?,
    }

    Ok(())
}

fn run_list(json: bool) -> Result<()> {
    let displays = list_displays();

    if json {
        println!("{}", serde_json::to_string_pretty(&displays)?);
        return Ok(());
    }

    if displays.is_empty() {
        println!("No displays found");
        return Ok(());
    }
    for display in &displays {
        println!("[{}] {}", display.index, display);
    }
    Ok(())
}

fn run_enable(
    mut preferences: Preferences,
    display: &str,
    resolution: Option<&str>,
) -> Result<()> {
    let identity = resolve_display(display)?;

    // Fall back to the last applied selection, then to the most common panel
    let selection_text = resolution
        .map(str::to_string)
        .or_else(|| preferences.last_resolution.clone())
        .unwrap_or_else(|| NamedResolution::R1920x1080.label().to_string());
    let selection = ResolutionSelection::parse(&selection_text)?;

    info!(display = %identity, selection = %selection, "submitting enable request");
    let worker = OverrideWorker::spawn();
    let outcome = worker
        .submit(OverrideRequest::Enable {
            identity,
            selection,
        })
        .recv()?;

    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }

    preferences.remember_selection(&selection_text);
    if let Err(err) = preferences.save() {
        info!(error = %err, "could not persist preferences");
    }
    Ok(())
}

fn run_disable(display: &str) -> Result<()> {
    let identity = resolve_display(display)?;

    info!(display = %identity, "submitting disable request");
    let worker = OverrideWorker::spawn();
    let outcome = worker
        .submit(OverrideRequest::Disable { identity })
        .recv()?;

    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

fn run_resolutions() {
    for named in NamedResolution::ALL {
        let ladder = named
            .ladder()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<30} {}", named.label(), ladder);
    }
}

fn run_font_smoothing(action: SmoothingAction) -> Result<()> {
    match action {
        SmoothingAction::Get => match smoothing::read_level()? {
            Some(level) => println!("AppleFontSmoothing is {level}"),
            None => println!("AppleFontSmoothing is not set"),
        },
        SmoothingAction::Set { value } => {
            if !smoothing::LEVEL_RANGE.contains(&value) {
                bail!("font smoothing value must be between -1 and 3");
            }
            if smoothing::write_level(value)? {
                println!("Font smoothing set to {value}. Log out and back in to apply changes.");
            } else {
                bail!("failed to set font smoothing");
            }
        }
    }
    Ok(())
}

/// Resolve a display argument: an index into the active display list, or a
/// VENDOR:PRODUCT hex pair for displays that are not currently attached.
fn resolve_display(argument: &str) -> Result<DisplayIdentity> {
    if let Ok(index) = argument.parse::<usize>() {
        let displays = list_displays();
        let Some(display) = displays.iter().find(|d| d.index == index) else {
            bail!(
                "no display at index {index} ({} attached)",
                displays.len()
            );
        };
        announce(display);
        return Ok(display.identity());
    }

    Ok(DisplayIdentity::parse(argument)?)
}

fn announce(target: &DisplayInfo) {
    info!(display = %target, apple_silicon = target.apple_silicon, "targeting display");
}
