// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! swfmtconv CLI
//!
//! Inspect the pixel format catalog, validate device descriptions, and run a
//! simulated bring-up of a SW format converter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod simulated;

use commands::probe::FormatRequest;

#[derive(Parser)]
#[command(name = "swfmtconv")]
#[command(author, version, about = "Xilinx SW format converter tooling", long_about = None)]
struct Cli {
    /// Log filter (e.g. "debug", "swfmtconv=trace"). Falls back to RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pixel formats a converter can be configured to pass
    Formats,

    /// Validate a device description and print the resolved topology
    Validate {
        /// Device description file (YAML)
        #[arg(value_name = "DEVICE_FILE")]
        file: PathBuf,

        /// Print the topology as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bring up a converter against simulated resources and print its pad formats
    Probe {
        /// Device description file (YAML)
        #[arg(value_name = "DEVICE_FILE")]
        file: PathBuf,

        /// Device name used for registration
        #[arg(long, default_value = "swconv0")]
        name: String,

        /// Format to set after bring-up, as PAD:WHICH:WIDTHxHEIGHT[:CODE]
        /// (WHICH is 0 for trial, 1 for active; may be repeated)
        #[arg(long = "set", value_name = "REQUEST")]
        requests: Vec<FormatRequest>,

        /// Print the resulting pad formats as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter '{}'", level))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Formats => commands::formats::run()?,
        Commands::Validate { file, json } => commands::validate::run(&file, json)?,
        Commands::Probe {
            file,
            name,
            requests,
            json,
        } => commands::probe::run(&file, &name, &requests, json)?,
    }

    Ok(())
}
