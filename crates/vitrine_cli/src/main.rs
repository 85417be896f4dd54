//! Vitrine CLI
//!
//! Replay scripted interactions against an enhanced page and inspect the
//! result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vitrine_page::PageSnapshot;

mod fixture;
mod runner;

use fixture::Fixture;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vitrine page enhancement runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a fixture's steps and print the recorded page states
    Run {
        /// Fixture file (TOML)
        fixture: PathBuf,

        /// Print snapshots as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a fixture's page and report which enhancements attach
    Check {
        /// Fixture file (TOML)
        fixture: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { fixture, json } => cmd_run(&fixture, json),
        Commands::Check { fixture } => cmd_check(&fixture),
    }
}

fn cmd_run(path: &Path, json: bool) -> Result<()> {
    let fixture = Fixture::load(path)?;
    info!("Running {} ({} steps)", path.display(), fixture.steps.len());

    let report = runner::run(&fixture)?;

    if json {
        let output = serde_json::json!({
            "snapshots": report.snapshots,
            "final": report.final_state,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (index, snapshot) in report.snapshots.iter().enumerate() {
        println!("#{:<3} {}", index + 1, describe(snapshot));
    }
    println!("end  {}", describe(&report.final_state));

    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let fixture = Fixture::load(path)?;
    let page = runner::build_page(&fixture)?;
    let features = page.enhancer().features();

    println!("Fixture: {}", path.display());
    println!("  slider:     {}", attached(features.slider));
    println!("  newsletter: {}", attached(features.newsletter));
    println!("  year:       {}", attached(features.year));
    println!("  steps:      {}", fixture.steps.len());

    Ok(())
}

fn attached(yes: bool) -> &'static str {
    if yes {
        "attached"
    } else {
        "not attached"
    }
}

fn describe(snapshot: &PageSnapshot) -> String {
    let mut parts = vec![format!("[{:>6}ms]", snapshot.elapsed_ms)];

    if let Some(slider) = &snapshot.slider {
        let max = (slider.content_width - slider.viewport_width).max(0.0);
        parts.push(format!(
            "offset={:.1}/{:.1}{} prev={} next={}",
            slider.offset,
            max,
            if slider.animating { "~" } else { "" },
            state_word(slider.prev_disabled),
            state_word(slider.next_disabled),
        ));
    }
    if let Some(focused) = &snapshot.focused {
        parts.push(format!("focus=#{}", focused));
    }
    if let Some(newsletter) = &snapshot.newsletter {
        if !newsletter.status.is_empty() {
            parts.push(format!("status={:?}", newsletter.status));
        }
    }
    parts.push(format!("videos_playing={}", snapshot.videos_playing));

    parts.join(" ")
}

fn state_word(disabled: bool) -> &'static str {
    if disabled {
        "disabled"
    } else {
        "enabled"
    }
}
