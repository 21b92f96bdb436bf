// Output format configuration arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::output::OutputFormat;
use clap::Args;

/// Output format and display options
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print each record as a JSON document (one per line)
    #[arg(long = "json")]
    pub json: bool,

    /// Pretty print JSON output (implies --json)
    #[arg(long = "json-pretty")]
    pub json_pretty: bool,

    /// Disable colored output
    #[arg(long = "no-color", visible_alias = "no-colour")]
    pub no_color: bool,

    /// Quiet mode (no skip notices on stderr)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose level (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json_pretty {
            OutputFormat::JSONPretty
        } else if self.json {
            OutputFormat::JSON
        } else {
            OutputFormat::Terminal
        }
    }
}
