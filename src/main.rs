//! FARS Explorer - command line entry point
//!
//! Summarizes accidents per month over several years, or maps one state's
//! accidents for a single year.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fars_explorer::charts::PlotOutcome;
use fars_explorer::config::{Config, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_OUTPUT, DEFAULT_MAP_WIDTH};
use fars_explorer::logging::init_logging;
use fars_explorer::{plot_state_with_config, summarize_with_config};
use polars::prelude::{CsvWriter, SerWriter};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fars_explorer")]
#[command(about = "Summarize and map FARS accident records", long_about = None)]
struct Cli {
    /// Directory containing accident_<year>.csv.bz2 files
    #[arg(short, long, global = true, env = "FARS_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count accidents per month for each year
    Summarize {
        /// Years to include, e.g. 2013 2014 2015
        #[arg(value_name = "YEAR", required = true)]
        years: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Plot one state's accident locations for a year
    PlotState {
        /// Numeric STATE code
        #[arg(short, long)]
        state: String,

        /// Year to plot
        #[arg(short, long)]
        year: String,

        /// PNG file to write
        #[arg(short, long, default_value = DEFAULT_MAP_OUTPUT)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MAP_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_MAP_HEIGHT)]
        height: u32,

        /// Open the map with the system viewer afterwards
        #[arg(long, default_value_t = false)]
        open: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::default().with_data_dir(cli.data_dir);

    match cli.command {
        Commands::Summarize { years, format } => {
            let table = summarize_with_config(&config, years.as_slice())
                .context("failed to summarize accident years")?;
            if table.is_empty() {
                warn!("no accident data for the requested years");
            }

            match format {
                OutputFormat::Table => {
                    let df = table.to_dataframe()?;
                    println!("{}", df);
                }
                OutputFormat::Csv => {
                    let mut df = table.to_dataframe()?;
                    CsvWriter::new(std::io::stdout())
                        .include_header(true)
                        .finish(&mut df)?;
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                }
            }
        }
        Commands::PlotState {
            state,
            year,
            output,
            width,
            height,
            open,
        } => {
            let config = config.with_output(output).with_map_size(width, height);
            let outcome = plot_state_with_config(&config, &state, year.as_str())
                .with_context(|| format!("failed to plot state {} for {}", state, year))?;

            if let PlotOutcome::Rendered { .. } = outcome {
                info!(path = %config.output.display(), "map saved");
                if open {
                    open::that(&config.output).with_context(|| {
                        format!("failed to open {}", config.output.display())
                    })?;
                }
            }
        }
    }

    Ok(())
}
