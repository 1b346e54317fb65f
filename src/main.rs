//! Load client CLI for the S2 order-clustering service.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use orders_load_test::{
    client::OrderClient,
    config::TestConfig,
    generator::PointGenerator,
    payload::OrderPayload,
    report::RunReport,
    response::{self, Outcome},
};

#[derive(Parser)]
#[command(name = "orders-load-test")]
#[command(about = "Synthetic order load client for the S2 clustering service", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a load sample from a scenario file
    Run {
        /// Path to scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Override total point count
        #[arg(short, long)]
        points: Option<usize>,

        /// Override vehicle tag
        #[arg(short, long)]
        vehicle: Option<String>,

        /// Override endpoint URL
        #[arg(short, long)]
        url: Option<String>,

        /// Override output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Report format: table (default), json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Run a quick sample with the reference defaults
    Quick {
        /// Endpoint URL
        #[arg(short, long, default_value = "http://localhost:1616/orders/aragon")]
        url: String,

        /// Vehicle tag
        #[arg(short, long, default_value = "bike")]
        vehicle: String,

        /// Total point count
        #[arg(short, long, default_value = "2000")]
        points: usize,

        /// Output file path
        #[arg(short, long, default_value = "s2_orders_2000.geojson")]
        output: PathBuf,

        /// RNG seed for a reproducible point cloud
        #[arg(long)]
        seed: Option<u64>,

        /// Report format: table (default), json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List available scenarios
    List {
        /// Scenarios directory
        #[arg(short, long, default_value = "scenarios")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Run {
            scenario,
            points,
            vehicle,
            url,
            output,
            seed,
            format,
        } => {
            println!("Loading scenario: {}", scenario.display());

            let mut config = TestConfig::from_file(&scenario)?;

            // Apply overrides
            if let Some(p) = points {
                config.total_points = p;
            }
            if let Some(v) = vehicle {
                config.vehicle = v;
            }
            if let Some(u) = url {
                config.endpoint_url = u;
            }
            if let Some(o) = output {
                config.output_path = o;
            }
            if let Some(s) = seed {
                config.seed = Some(s);
            }

            execute(config, &format).await
        }
        Commands::Quick {
            url,
            vehicle,
            points,
            output,
            seed,
            format,
        } => {
            let config = TestConfig {
                name: "quick".to_string(),
                description: "Quick diagnostic run".to_string(),
                endpoint_url: url,
                vehicle,
                total_points: points,
                output_path: output,
                seed,
                ..Default::default()
            };

            execute(config, &format).await
        }
        Commands::List { dir } => {
            println!("Available scenarios in {}:", dir.display());
            println!();

            match std::fs::read_dir(&dir) {
                Ok(entries) => {
                    let mut scenarios = Vec::new();

                    for entry in entries.flatten() {
                        let path = entry.path();
                        let is_yaml = path
                            .extension()
                            .and_then(|s| s.to_str())
                            .map(|ext| ext == "yaml" || ext == "yml")
                            .unwrap_or(false);
                        if is_yaml {
                            match TestConfig::from_file(&path) {
                                Ok(config) => scenarios.push((
                                    path.file_name()
                                        .unwrap_or_default()
                                        .to_string_lossy()
                                        .to_string(),
                                    config.name,
                                    config.description,
                                )),
                                Err(e) => {
                                    warn!(path = %path.display(), error = %e, "skipping unreadable scenario");
                                }
                            }
                        }
                    }

                    scenarios.sort_by(|a, b| a.0.cmp(&b.0));

                    if scenarios.is_empty() {
                        println!("No scenario files found");
                    } else {
                        for (filename, name, description) in scenarios {
                            println!("  {} - {}", filename, name);
                            if !description.is_empty() {
                                println!("    {}", description);
                            }
                            println!();
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error reading directory: {}", e);
                    eprintln!("Make sure the directory exists and is readable");
                }
            }

            Ok(())
        }
    }
}

/// Execute one full run: generate the cloud, send it once, classify the
/// response, and print the report.
async fn execute(config: TestConfig, format: &str) -> Result<()> {
    config.validate()?;

    println!("✓ Configuration loaded successfully");
    println!("  Name: {}", config.name);
    if !config.description.is_empty() {
        println!("  Description: {}", config.description);
    }
    println!("  Endpoint: {}", config.endpoint_url);
    println!("  Vehicle: {}", config.vehicle);
    println!("  Points: {}", config.total_points);
    println!();

    let mut generator = PointGenerator::new(config.clone());
    let points = generator.generate();
    let payload = OrderPayload::new(points, config.vehicle.clone())?;

    println!(
        "Sending {} orders to {} ...",
        payload.points.len(),
        config.endpoint_url
    );

    let client = OrderClient::new(Duration::from_secs(config.timeout_secs))?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Waiting for response...");
    let sent = client.send(&config.endpoint_url, &payload).await;
    spinner.finish_and_clear();
    let sent = sent?;

    let outcome = response::handle_response(sent.status, &sent.body, &config.output_path)?;

    println!();
    match &outcome {
        Outcome::Success {
            summary,
            output_path,
        } => {
            println!(
                "✓ Response OK ({}) in {:.3}s",
                sent.status,
                sent.elapsed.as_secs_f64()
            );
            println!("  Features: {}", summary.feature_count);
            println!("  CRS: {}", summary.crs_name);
            println!("  Saved output to {}", output_path.display());
        }
        Outcome::UnexpectedStatus { status, body } => {
            println!("✗ HTTP {}: {}", status, body);
        }
    }
    println!();

    let report = RunReport::new(&config, payload.points.len(), sent.elapsed, &outcome);
    match format {
        "json" => {
            println!("{}", report.format_json()?);
        }
        "csv" => {
            println!("{}", RunReport::csv_header());
            println!("{}", report.format_csv());
        }
        _ => {
            println!("{}", report.format_table());
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
