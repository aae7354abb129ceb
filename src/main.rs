// =============================================================================
// GPW Radar — Main Entry Point
// =============================================================================
//
// Command-line scanner for Warsaw Stock Exchange instruments: one command
// classifies a single instrument in detail, the other scans the whole
// watchlist and prints the ranked radar.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod config;
mod indicators;
mod market_data;
mod scanner;
mod signals;
mod types;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::RadarConfig;
use crate::market_data::{Watchlist, YahooChartClient};
use crate::scanner::{RadarReport, ScanReport};
use crate::types::{BandState, MomentumState};

#[derive(Parser)]
#[command(name = "gpw-radar", version, about = "Bollinger/MACD scanner for GPW instruments")]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, default_value = "radar_config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single instrument from a free-text query.
    Scan {
        /// Ticker, symbol stem, or company name fragment (e.g. "PKN", "orlen").
        query: String,

        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Scan the whole watchlist and rank the candidates.
    Radar {
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    // Diagnostics go to stderr; stdout carries nothing but the reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        GPW Radar — Starting Up                           ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let cli = Cli::parse();

    let mut config = RadarConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        RadarConfig::default()
    });

    // Override the watchlist file from env if available.
    if let Ok(path) = std::env::var("RADAR_WATCHLIST") {
        if !path.trim().is_empty() {
            config.watchlist_path = Some(path);
        }
    }

    // ── 2. Watchlist & client ────────────────────────────────────────────
    let watchlist = match config.watchlist_path.as_deref() {
        Some(path) => Watchlist::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load watchlist, using built-in universe");
            Watchlist::default_gpw()
        }),
        None => Watchlist::default_gpw(),
    };

    let client = YahooChartClient::new();

    // ── 3. Run the requested command ─────────────────────────────────────
    match cli.command {
        Command::Scan { query, json } => {
            let report = scanner::scan_symbol(&client, &watchlist, &config, &query)
                .await
                .with_context(|| format!("scan failed for '{query}'"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_scan_report(&report);
            }
        }
        Command::Radar { json } => {
            let report = scanner::run_radar(&client, &watchlist, &config).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_radar_report(&report);
            }
        }
    }

    Ok(())
}

// ── Text rendering ───────────────────────────────────────────────────────────

fn band_marker(band: BandState) -> &'static str {
    match band {
        BandState::Oversold => "🟢",
        BandState::Overheated => "🔴",
        BandState::Neutral => "🟡",
    }
}

fn momentum_marker(momentum: MomentumState) -> &'static str {
    match momentum {
        MomentumState::Uptrend => "🟢",
        MomentumState::Downtrend => "🔴",
        MomentumState::Transition => "🟡",
    }
}

fn print_scan_report(report: &ScanReport) {
    println!();
    println!("🏢 {} ({})", report.name, report.symbol);
    println!("   Session   {}", report.date);
    println!("   Close     {:.2}", report.snapshot.close);
    println!(
        "   Bands     {} {}   [lower {:.2} / sma {:.2} / upper {:.2}]",
        band_marker(report.band),
        report.band,
        report.snapshot.lower,
        report.snapshot.sma,
        report.snapshot.upper,
    );
    println!(
        "   Momentum  {} {}   [MACD {:.3} / signal {:.3} / hist {:.3}]",
        momentum_marker(report.momentum),
        report.momentum,
        report.snapshot.macd,
        report.snapshot.signal,
        report.snapshot.histogram,
    );
}

fn print_radar_report(report: &RadarReport) {
    println!();
    println!(
        "📡 Radar: {} scanned, {} ranked, {} skipped",
        report.scanned,
        report.candidates.len(),
        report.skips.len()
    );

    if report.candidates.is_empty() {
        println!("   no candidates today");
    }
    for c in &report.candidates {
        println!(
            "   {:<14} {:<12} {:<28} {:>9.2}   {} / {}",
            c.tier.label(),
            c.symbol,
            c.name,
            c.close,
            c.band,
            c.momentum,
        );
    }

    if !report.skips.is_empty() {
        println!();
        println!("   skipped:");
        for s in &report.skips {
            println!("   - {} ({}): {}", s.symbol, s.name, s.message);
        }
    }
}
