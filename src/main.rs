// renewal-audit - Certificate status report for ACME client renewal records
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use clap::Parser;
use colored::Colorize;
use renewal_audit::Args;
use renewal_audit::commands::CommandRouter;
use renewal_audit::output::FATAL_EXIT_CODE;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.output.verbose);

    // Handle --no-color (disable colored output)
    if args.output.no_color {
        colored::control::set_override(false);
    }

    let command = CommandRouter::route(args);
    debug!("Running {}", command.name());

    match command.execute() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

/// Initialize logging - RUST_LOG wins over the -v count
fn init_logging(verbose: u8) {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        });

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
