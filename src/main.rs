//! Storm Overflow Swim Report
//!
//! Generates static HTML reports on recent storm overflow discharges
//! upstream of river swim sites:
//! 1. Queries the overflow activity service for each site's watercourses
//! 2. Totals discharge durations by distance band and classifies risk
//! 3. Checks the 3-day rain forecast for each site
//! 4. Writes one page per site, an index page and map data
//!
//! Usage:
//!   cargo run --release                           # all sites in sites.toml → docs/
//!   cargo run --release -- --site conham          # one site only
//!   cargo run --release -- --output public --no-forecast
//!
//! Environment:
//!   OVERFLOW_API_URL, FORECAST_API_URL, OUTPUT_DIR - endpoint/output overrides
//!   RUST_LOG - log filter (default: info)

use chrono::Utc;
use overflow_watch::config::{self, RunConfig};
use overflow_watch::logging;
use overflow_watch::pipeline::{self, ReportRunner};
use std::env;
use std::path::PathBuf;

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--config PATH] [--output DIR] [--site SLUG] [--no-forecast]",
        program
    );
}

fn main() {
    logging::init();

    println!("💩 Storm Overflow Swim Report");
    println!("=============================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut run_config = RunConfig::from_env();
    let mut sites_path = PathBuf::from(config::DEFAULT_SITES_PATH);
    let mut only_site: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "--output" | "--site" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a value", args[i]);
                    print_usage(&args[0]);
                    std::process::exit(1);
                };
                match args[i].as_str() {
                    "--config" => sites_path = PathBuf::from(value),
                    "--output" => run_config.output_dir = PathBuf::from(value),
                    _ => only_site = Some(value.clone()),
                }
                i += 2;
            }
            "--no-forecast" => {
                run_config.skip_forecast = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load site registry
    println!("📋 Loading sites from {}...", sites_path.display());
    let mut sites = match config::load_sites(&sites_path) {
        Ok(sites) => sites,
        Err(e) => {
            eprintln!("\n✗ {}\n", e);
            std::process::exit(1);
        }
    };

    if let Some(slug) = &only_site {
        sites.retain(|s| &s.slug == slug);
        if sites.is_empty() {
            eprintln!("\n✗ No site with slug '{}' in {}\n", slug, sites_path.display());
            std::process::exit(1);
        }
    }
    println!("✓ {} site(s) configured\n", sites.len());

    let runner = match ReportRunner::new(run_config, sites) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("\n✗ {}\n", e);
            std::process::exit(1);
        }
    };

    println!("🔍 Checking overflows in the last {} hours...", runner.config().window_hours);
    if runner.config().skip_forecast {
        println!("   (rain forecast disabled)");
    }

    match runner.run(Utc::now()) {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "   ✓ {:<40} {:<6} ({} overflow(s) counted, {} rain warning(s))",
                    report.site.name,
                    report.risk.to_string(),
                    report.summary.counted,
                    report.warnings.len()
                );
            }
            println!(
                "\n✓ Report written to {}/\n",
                runner.config().output_dir.display()
            );
        }
        Err(e) => {
            eprintln!("\n✗ Report failed: {}", e);
            if pipeline::output_may_be_partial(e.as_ref()) {
                eprintln!(
                    "   Some files in {}/ may already have been replaced.\n",
                    runner.config().output_dir.display()
                );
            } else {
                eprintln!("   No files were written.\n");
            }
            std::process::exit(1);
        }
    }
}
