// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cierres CLI entrypoint.
//!
//! `inspect` summarizes a document; `resave` loads and saves it again, which normalizes
//! formatting and writes back global ids and positions.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cierres::config::EditorConfig;
use cierres::model::{EditorSession, Period};
use cierres::ops::history::DEFAULT_HISTORY_CAPACITY;
use cierres::query::{extent, present_periods};

#[derive(Parser)]
#[command(name = "cierres", version, about = "Inspect and rewrite period-grid form documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of undo steps kept per session.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HISTORY_CAPACITY, global = true)]
    history_capacity: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Print item counts per period, groups, duplicate codes and global ids.
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Load a document and save it to another path.
    Resave {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EditorConfig::default().with_history_capacity(cli.history_capacity);
    let result = match &cli.command {
        Command::Inspect { file } => inspect(config, file),
        Command::Resave { input, output } => resave(config, input, output),
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inspect(config: EditorConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut session = EditorSession::with_config(config);
    let summary = session.load(path)?;
    if summary.notice().is_some() {
        println!("{}: no valid items", path.display());
        return Ok(());
    }

    let items = session.items();
    let size = extent(items);
    println!(
        "{}: {} items on a {}x{} grid",
        path.display(),
        summary.item_count,
        size.rows,
        size.cols
    );

    for period in present_periods(items) {
        let count = items
            .ids()
            .filter(|&id| items.period(id) == Some(period))
            .count();
        println!("  {period:<6} {count}");
    }
    println!("  groups {}", session.groups().len());

    let global_ids = Period::ALL
        .into_iter()
        .map(|period| match session.global_ids().get(period) {
            Some(id) => format!("{}={id}", period.tag()),
            None => format!("{}=-", period.tag()),
        })
        .collect::<Vec<_>>();
    println!("  global ids {}", global_ids.join(" "));

    let duplicates = session.duplicates();
    if !duplicates.is_empty() {
        let codes = duplicates.codes().into_iter().collect::<Vec<_>>();
        println!("  duplicate codes {}", codes.join(", "));
    }
    Ok(())
}

fn resave(config: EditorConfig, input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    let mut session = EditorSession::with_config(config);
    let summary = session.load(input)?;
    session.save(output)?;
    println!(
        "{} -> {}: {} items",
        input.display(),
        output.display(),
        summary.item_count
    );
    Ok(())
}
