//! # mzTab-M Metadata Tool
//!
//! A command-line front end for assembling and ordering mzTab-M MTD sections.
//!
//! ## Usage
//!
//! ```bash
//! # Assemble the MTD section described by a study file
//! mztabm mtd study.toml --design design.tsv
//!
//! # Put existing MTD rows into canonical order
//! grep '^MTD' study.mztab | mztabm sort
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{Read, Write};
use std::path::PathBuf;

use mztabm::config::StudyConfig;
use mztabm::design::DesignTable;
use mztabm::mtd::{sort_section, Section};

/// mztabm - mzTab-M metadata section builder
#[derive(Parser)]
#[command(name = "mztabm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the MTD section described by a TOML study file
    Mtd {
        /// Study file path
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Tab separated design table, one row per assay
        #[arg(short, long, value_name = "TSV")]
        design: Option<PathBuf>,

        /// Print the rows as JSON instead of MTD lines
        #[arg(long)]
        json: bool,
    },

    /// Read MTD rows from stdin and print them in canonical order
    Sort,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Mtd {
            config,
            design,
            json,
        } => run_mtd(config, design, json),
        Commands::Sort => run_sort(),
    }
}

fn run_mtd(config: PathBuf, design: Option<PathBuf>, json: bool) -> Result<()> {
    info!("Reading study file {}", config.display());
    let study = StudyConfig::from_file(&config)
        .with_context(|| format!("Failed to load study file: {}", config.display()))?;

    let design = match design {
        Some(path) => {
            info!("Reading design table {}", path.display());
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open design table: {}", path.display()))?;
            let table = DesignTable::from_reader(file)
                .with_context(|| format!("Failed to parse design table: {}", path.display()))?;
            Some(table)
        }
        None => None,
    };

    let section = study
        .build_section(design.as_ref())
        .context("Failed to assemble MTD section")?;
    info!("Assembled {} MTD rows", section.len());

    if json {
        println!("{}", section.to_json().context("Failed to serialize MTD section")?);
        Ok(())
    } else {
        write_section(&section)
    }
}

fn run_sort() -> Result<()> {
    let section = read_mtd_rows(std::io::stdin().lock())?;
    info!("Sorting {} MTD rows", section.len());

    write_section(&sort_section(section))
}

/// Read `MTD<TAB>key<TAB>value` or `key<TAB>value` records; blank records are skipped
fn read_mtd_rows<R: Read>(reader: R) -> Result<Section> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut section = Section::new();
    for (number, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read record {}", number + 1))?;
        let mut fields = record.iter().map(str::trim);
        let mut key = fields.next().unwrap_or_default();
        if key == "MTD" {
            key = fields.next().unwrap_or_default();
        }
        if key.is_empty() {
            continue;
        }
        section.push(key, fields.next().unwrap_or_default());
    }
    Ok(section)
}

fn write_section(section: &Section) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in section {
        writeln!(out, "MTD\t{}\t{}", row.key, row.value).context("Failed to write to stdout")?;
    }
    Ok(())
}
