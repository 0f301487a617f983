//! # Tray Report
//!
//! Prints the tray report for one day from a JSON store snapshot.
//!
//! ## Usage
//! ```bash
//! # Today's report
//! cargo run -p karat-store --bin tray-report -- --snapshot ./store.json
//!
//! # A specific day, as JSON
//! cargo run -p karat-store --bin tray-report -- -s ./store.json -d 2026-10-19 --json
//!
//! # Custom config file
//! cargo run -p karat-store --bin tray-report -- -s ./store.json -c ./karat.toml
//! ```

use std::env;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use karat_store::{init_tracing, KaratConfig, MemoryStore, ReportService};

fn print_help() {
    println!("Karat Tray Report");
    println!();
    println!("Usage: tray-report --snapshot <PATH> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --snapshot <PATH>  JSON store snapshot (required)");
    println!("  -d, --date <DATE>      Report date, YYYY-MM-DD (default: today in shop time)");
    println!("  -c, --config <PATH>    Config file (default: platform config dir)");
    println!("      --json             Print the report as JSON");
    println!("  -h, --help             Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut snapshot: Option<PathBuf> = None;
    let mut date: Option<NaiveDate> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--date" | "-d" => {
                if i + 1 < args.len() {
                    date = Some(NaiveDate::parse_from_str(&args[i + 1], "%Y-%m-%d")?);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let Some(snapshot) = snapshot else {
        print_help();
        return Err("--snapshot is required".into());
    };

    let config = KaratConfig::load_or_default(config_path);
    let offset = config.report.offset()?;
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());

    let store = MemoryStore::from_file(&snapshot)?;
    let report = ReportService::new(store, offset).tray_report(date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Tray report for {}", report.date);
    println!("================================");
    println!(
        "{:<10} {:>8} {:>12} {:>6} {:>12} {:>8} {:>12}",
        "Tray", "Open qty", "Open wt", "Sold", "Sold wt", "Cur qty", "Cur wt"
    );
    for row in report.rows() {
        println!(
            "{:<10} {:>8} {:>12} {:>6} {:>12} {:>8} {:>12}",
            row.label,
            row.opening_qty,
            row.opening_weight,
            row.sold_qty,
            row.sold_weight,
            row.current_qty,
            row.current_weight
        );
    }

    if report.needs_review() {
        println!();
        println!("⚠ {} ambiguous sale match(es):", report.ambiguities.len());
        for m in &report.ambiguities {
            println!(
                "  tray {} item {}: {} matching sale lines",
                m.tray_number, m.item_id, m.candidates
            );
        }
    }

    Ok(())
}
