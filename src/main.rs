//! dgt-balizas main entry point
//!
//! Command-line interface over the DGT fixed-obstacle feed.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dgt_balizas::config::{load_config_or_default, Config};
use dgt_balizas::output::{
    format_record_detail, format_record_line, print_statistics, write_map_page, Envelope,
    FeedStatistics,
};
use dgt_balizas::pipeline::{filter_active, filter_category, find_by_id, locate, locate_batch};
use dgt_balizas::{Category, Pipeline, Resolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// dgt-balizas: active road beacons from the DGT incident feed
///
/// Fetches the "fixed obstacle" incidents published by the DGT, normalizes
/// them and optionally places them on a map through Nominatim.
#[derive(Parser, Debug)]
#[command(name = "dgt-balizas")]
#[command(version)]
#[command(about = "Active road beacons from the DGT incident feed", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List fixed-obstacle incidents
    List {
        /// Autonomous community filter, e.g. "galicia"
        #[arg(long)]
        region: Option<String>,

        /// Province filter, e.g. "madrid"
        #[arg(long)]
        province: Option<String>,

        /// Include incidents that have already ended
        #[arg(long)]
        all: bool,

        /// Only this category: accident or plain
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show one incident by its upstream id
    Show {
        id: String,

        /// Resolve approximate coordinates for the incident
        #[arg(long)]
        locate: bool,
    },

    /// Show statistics for the current listing
    Stats {
        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        province: Option<String>,
    },

    /// Geocode active incidents and write a static map page
    Map {
        /// Output HTML file (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of incidents to geocode
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        tracing::error!("{:#}", e);
        if cli.json {
            match Envelope::failure(format!("{:#}", e)).to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to render error: {}", e),
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dgt_balizas=info,warn"),
            1 => EnvFilter::new("dgt_balizas=debug,info"),
            2 => EnvFilter::new("dgt_balizas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match &cli.command {
        Command::List {
            region,
            province,
            all,
            category,
        } => {
            handle_list(
                &config,
                region.as_deref(),
                province.as_deref(),
                *all,
                *category,
                cli.json,
            )
            .await
        }
        Command::Show { id, locate } => handle_show(&config, id, *locate, cli.json).await,
        Command::Stats { region, province } => {
            handle_stats(&config, region.as_deref(), province.as_deref(), cli.json).await
        }
        Command::Map { output, limit } => {
            handle_map(&config, output.clone(), *limit, cli.json).await
        }
    }
}

/// Handles `list`: fetch, filter, print
async fn handle_list(
    config: &Config,
    region: Option<&str>,
    province: Option<&str>,
    all: bool,
    category: Option<Category>,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let mut records = pipeline.fetch(region, province).await?;

    if !all {
        records = filter_active(&records);
    }
    if let Some(category) = category {
        records = filter_category(&records, category);
    }

    if json {
        let total = records.len();
        println!("{}", Envelope::ok(records).with_total(total).to_json()?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No incidents found");
        return Ok(());
    }
    for record in &records {
        println!("{}", format_record_line(record));
    }
    println!("\n{} incidents", records.len());
    Ok(())
}

/// Handles `show`: one record, optionally geocoded
async fn handle_show(config: &Config, id: &str, with_location: bool, json: bool) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let records = pipeline.fetch(None, None).await?;

    let mut record = find_by_id(&records, id)
        .cloned()
        .with_context(|| format!("Incident {} not found", id))?;

    if with_location {
        let mut resolver = Resolver::new(&config.geocoder)?;
        if !locate(&mut record, &mut resolver).await {
            tracing::warn!("Could not geocode incident {}", id);
        }
    }

    if json {
        println!("{}", Envelope::ok(&record).to_json()?);
    } else {
        print!("{}", format_record_detail(&record));
    }
    Ok(())
}

/// Handles `stats`
async fn handle_stats(
    config: &Config,
    region: Option<&str>,
    province: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let report = pipeline.fetch_report(region, province).await?;
    let stats = FeedStatistics::from_report(&report);

    if json {
        println!("{}", Envelope::ok(&stats).to_json()?);
    } else {
        print_statistics(&stats);
    }
    Ok(())
}

/// Handles `map`: geocode a bounded number of active records, write the page
async fn handle_map(
    config: &Config,
    output: Option<PathBuf>,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let mut records = filter_active(&pipeline.fetch(None, None).await?);
    let limit = limit.unwrap_or(config.map.max_records);

    tracing::info!(
        "Geocoding up to {} of {} active incidents (this can take a while)",
        limit,
        records.len()
    );
    let mut resolver = Resolver::new(&config.geocoder)?;
    let summary = locate_batch(&mut records, &mut resolver, limit).await;

    let path = output.unwrap_or_else(|| PathBuf::from(&config.map.output_path));
    let markers = write_map_page(&records, &config.map, &path)
        .with_context(|| format!("Failed to write map to {}", path.display()))?;

    if json {
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "markers": markers,
            "attempted": summary.attempted,
            "deferred": summary.deferred,
        });
        println!("{}", Envelope::ok(data).to_json()?);
    } else {
        println!(
            "Map written to {} ({} of {} geocoded incidents)",
            path.display(),
            markers,
            summary.attempted
        );
    }
    Ok(())
}
