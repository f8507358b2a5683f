#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the crime prediction toolchain.
//!
//! ```text
//! crime_predict_cli serve
//! crime_predict_cli search <term>
//! crime_predict_cli district <name>
//! crime_predict_cli export <server-data.json> [--crime-types <file>] [--format pdf|csv] [--out <path>]
//! crime_predict_cli forecast <server-data.json> [--seed <n>]
//! ```
//!
//! Running with no subcommand enters interactive mode.

use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use crime_predict_dashboard::forecast::{MONTH_LABELS, SEASONAL_FACTORS, monthly_forecast};
use crime_predict_export::ExportFormat;
use crime_predict_prediction_models::{ServerResults, parse_crime_types, parse_server_data};
use dialoguer::{Input, Select};
use rand::SeedableRng as _;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(
    name = "crime_predict_cli",
    about = "Serve, search and export crime prediction results"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server (configured from the environment)
    Serve,
    /// Search districts by name or alias
    Search {
        /// Search term (case-insensitive substring)
        term: String,
    },
    /// Show a district and its sample incident locations
    District {
        /// Exact district name
        name: String,
    },
    /// Export prediction results as a PDF or CSV report
    Export {
        /// File holding the `server-data` JSON
        input: PathBuf,
        /// File holding the `crime-types` JSON list
        #[arg(long)]
        crime_types: Option<PathBuf>,
        /// Output format (pdf or csv)
        #[arg(long, default_value = "pdf", value_parser = parse_format)]
        format: ExportFormat,
        /// Output path (defaults to the dated report file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the 12-month seasonal forecast
    Forecast {
        /// File holding the `server-data` JSON
        input: PathBuf,
        /// Seed for reproducible jitter
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value
        .parse()
        .map_err(|_| format!("unknown format '{value}' (expected pdf or csv)"))
}

/// Top-level tool selection for interactive mode.
enum Tool {
    Server,
    Search,
    Export,
}

impl Tool {
    const ALL: &[Self] = &[Self::Server, Self::Search, Self::Export];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start server",
            Self::Search => "Search districts",
            Self::Export => "Export a report",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive().await;
    };

    match command {
        Commands::Serve => serve(false).await?,
        Commands::Search { term } => search(&term),
        Commands::District { name } => {
            if !show_district(&name) {
                eprintln!("Unknown district: {name}");
                std::process::exit(1);
            }
        }
        Commands::Export {
            input,
            crime_types,
            format,
            out,
        } => export(&input, crime_types.as_deref(), format, out)?,
        Commands::Forecast { input, seed } => forecast(&input, seed)?,
    }

    Ok(())
}

async fn interactive() -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Prediction Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Server => serve(true).await?,
        Tool::Search => {
            let term: String = Input::new().with_prompt("Search").interact_text()?;
            search(&term);
        }
        Tool::Export => {
            let input: String = Input::new()
                .with_prompt("server-data JSON file")
                .interact_text()?;
            let formats = [ExportFormat::Pdf, ExportFormat::Csv];
            let format = Select::new()
                .with_prompt("Format")
                .items(&["PDF", "CSV"])
                .default(0)
                .interact()?;
            export(Path::new(&input), None, formats[format], None)?;
        }
    }

    Ok(())
}

async fn serve(interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(async move {
            if interactive {
                crime_predict_server::interactive::run().await
            } else {
                crime_predict_server::run_server(crime_predict_server::ServerConfig::from_env())
                    .await
            }
        })
    })
    .await??;

    Ok(())
}

fn search(term: &str) {
    let results = crime_predict_district::search(term);
    if results.is_empty() {
        println!("No districts match '{term}'.");
        return;
    }

    for district in results {
        println!(
            "{:<16} {:>9.4} {:>9.4}",
            district.name, district.center.lat, district.center.lng
        );
    }
}

fn show_district(name: &str) -> bool {
    let Some(district) = crime_predict_district::find(name) else {
        return false;
    };

    println!("{} District", district.name);
    println!(
        "Center: {:.4}, {:.4}",
        district.center.lat, district.center.lng
    );
    println!("Aliases: {}", district.aliases.join(", "));
    println!();
    println!("High-Risk Areas:");
    for sample in crime_predict_district::sorted_samples(district) {
        println!(
            "  [{:<6}] {:<22} {:.4}, {:.4}  {}",
            sample.tier,
            sample.description,
            sample.position.lat,
            sample.position.lng,
            sample.crime_types.join(", ")
        );
    }
    true
}

fn load_results(input: &Path) -> Result<ServerResults, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(input)?;
    parse_server_data(Some(&text))
        .ok_or_else(|| format!("No prediction results in {}", input.display()).into())
}

fn export(
    input: &Path,
    crime_types: Option<&Path>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = parse_server_data(Some(&std::fs::read_to_string(input)?));
    let crime_types = match crime_types {
        Some(path) => parse_crime_types(Some(&std::fs::read_to_string(path)?)),
        None => parse_crime_types(None),
    };
    log::debug!("Exporting with {} crime types", crime_types.len());

    let file = crime_predict_export::export(
        format,
        results.as_ref(),
        &crime_types,
        Local::now().naive_local(),
        Utc::now().date_naive(),
    )?;

    let out = out.unwrap_or_else(|| PathBuf::from(&file.file_name));
    std::fs::write(&out, &file.bytes)?;
    println!("Wrote {}", out.display());

    Ok(())
}

fn forecast(input: &Path, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let results = load_results(input)?;
    let Some(poisson) = results.poisson else {
        return Err(format!("No Poisson prediction in {}", input.display()).into());
    };

    let base = poisson.prediction.unwrap_or(0.0);
    let intensity = results.kde.map(|kde| kde.intensity);
    let high_risk = results.svm.map(|svm| svm.high_risk);

    let values = match seed {
        Some(seed) => monthly_forecast(base, intensity, high_risk, &mut StdRng::seed_from_u64(seed)),
        None => monthly_forecast(base, intensity, high_risk, &mut rand::rng()),
    };

    for ((month, value), factor) in MONTH_LABELS.iter().zip(values).zip(SEASONAL_FACTORS) {
        println!("{month:<10} {value:>8.2}  ({:.0}%)", factor * 100.0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_defaults_to_pdf() {
        let cli = Cli::try_parse_from(["crime_predict_cli", "export", "data.json"]).unwrap();
        let Some(Commands::Export { format, out, .. }) = cli.command else {
            panic!("expected the export command");
        };
        assert_eq!(format, ExportFormat::Pdf);
        assert!(out.is_none());
    }

    #[test]
    fn export_format_accepts_csv() {
        let cli = Cli::try_parse_from([
            "crime_predict_cli",
            "export",
            "data.json",
            "--format",
            "csv",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Export {
                format: ExportFormat::Csv,
                ..
            })
        ));
    }

    #[test]
    fn export_format_rejects_unknown() {
        let err = Cli::try_parse_from([
            "crime_predict_cli",
            "export",
            "data.json",
            "--format",
            "docx",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert_eq!(
            parse_format("docx").unwrap_err(),
            "unknown format 'docx' (expected pdf or csv)"
        );
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["crime_predict_cli"]).unwrap();
        assert!(cli.command.is_none());
    }
}
