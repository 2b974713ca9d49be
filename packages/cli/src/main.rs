#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for searching mountain passes.
//!
//! ```text
//! pass_finder_cli [--config FILE] [--store FILE] [--traces DIR] <COMMAND>
//!   name <NAME>             show one pass with per-path profile summary
//!   distance <LOW> <HIGH>   paths by length in km
//!   elevation <LOW> <HIGH>  paths by elevation gain in m
//!   height <LOW> <HIGH>     passes by summit height in m
//!   region <REGION>
//!   country <COUNTRY>
//!   names                   list every pass name
//! ```
//!
//! Uses `indicatif-log-bridge` (via [`pass_finder_cli_utils::init_logger`])
//! so that log lines and the profiling progress bar share the terminal.

mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pass_finder_cli_utils::{MultiProgress, ProfilingProgress};
use pass_finder_pass::{DirectoryTraceProvider, Pass};
use pass_finder_search::{JsonRecordStore, PassSearch, SearchKey, SearchType, stats};

#[derive(Parser)]
#[command(
    name = "pass_finder_cli",
    about = "Search mountain passes and their climb profiles"
)]
struct Cli {
    /// Configuration file (defaults to ./pass_finder.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file holding the pass records
    #[arg(long)]
    store: Option<PathBuf>,

    /// Directory holding one raw trace file per path
    #[arg(long)]
    traces: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one pass by name or alternative name
    Name {
        name: String,
    },
    /// Find paths whose length in km lies in [LOW, HIGH]
    Distance {
        #[arg(allow_negative_numbers = true)]
        low: f64,
        #[arg(allow_negative_numbers = true)]
        high: f64,
    },
    /// Find paths whose elevation gain in m lies in [LOW, HIGH]
    Elevation {
        #[arg(allow_negative_numbers = true)]
        low: f64,
        #[arg(allow_negative_numbers = true)]
        high: f64,
    },
    /// Find passes whose summit height in m lies strictly between LOW and
    /// HIGH
    Height {
        #[arg(allow_negative_numbers = true)]
        low: f64,
        #[arg(allow_negative_numbers = true)]
        high: f64,
    },
    /// Find passes in a region
    Region {
        region: String,
    },
    /// Find passes in a country
    Country {
        country: String,
    },
    /// List every primary and alternative pass name
    Names,
}

impl Commands {
    fn query(&self) -> Option<(SearchKey, SearchType)> {
        match self {
            Self::Name { name } => Some((SearchKey::Name(name.clone()), SearchType::Name)),
            Self::Distance { low, high } => {
                Some((SearchKey::Range(*low, *high), SearchType::Distance))
            }
            Self::Elevation { low, high } => {
                Some((SearchKey::Range(*low, *high), SearchType::Elevation))
            }
            Self::Height { low, high } => Some((SearchKey::Range(*low, *high), SearchType::Height)),
            Self::Region { region } => {
                Some((SearchKey::Category(region.clone()), SearchType::Region))
            }
            Self::Country { country } => {
                Some((SearchKey::Category(country.clone()), SearchType::Country))
            }
            Self::Names => None,
        }
    }
}

fn main() {
    let multi = pass_finder_cli_utils::init_logger();
    let cli = Cli::parse();

    if let Err(e) = run(cli, &multi) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load(
        cli.config.as_deref(),
        config::Overrides {
            store: cli.store,
            traces: cli.traces,
        },
    )?;

    let store = JsonRecordStore::from_path(
        config
            .store_path
            .as_deref()
            .ok_or(config::ConfigError::MissingStore)?,
    )?;
    let provider =
        DirectoryTraceProvider::new(config.trace_dir.clone().unwrap_or_else(|| {
            PathBuf::from(config::DEFAULT_TRACE_DIR)
        }));
    let palette = config
        .palette_path
        .as_deref()
        .map(config::load_palette)
        .transpose()?;
    let bins = config.histogram_bins;
    let mut search = PassSearch::new(store, provider, config)
        .with_progress(ProfilingProgress::passes_bar(multi, "Profiling passes"));
    if let Some(palette) = palette {
        search = search.with_palette(palette);
    }

    let Some((key, search_type)) = cli.command.query() else {
        print!("{}", output::format_names(&search.name_corpus()?));
        return Ok(());
    };

    let passes = search.search(&key, search_type)?;

    if search_type == SearchType::Name {
        for pass in &passes {
            print!("{}", output::format_pass_details(pass));
        }
        return Ok(());
    }

    print!("{}", output::format_results(&passes));
    print_statistics(&passes, search_type, key.range(), bins);

    Ok(())
}

/// Charts the searched attribute, binned over the requested range when
/// there is one.
fn print_statistics(
    passes: &[Pass],
    search_type: SearchType,
    range: Option<(f64, f64)>,
    bins: usize,
) {
    let values = stats::searched_values(passes, search_type);
    let Some(histogram) = stats::histogram(&values, range, bins) else {
        return;
    };

    let label = match search_type {
        SearchType::Distance => "Path length (km)",
        SearchType::Elevation => "Path elevation gain (m)",
        SearchType::Name | SearchType::Height | SearchType::Region | SearchType::Country => {
            "Summit height (m)"
        }
    };
    println!();
    print!("{}", output::format_histogram(&histogram, label));
}
