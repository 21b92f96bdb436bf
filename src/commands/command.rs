// Command trait - Defines the interface for all command implementations
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::Result;

/// Command trait - One operational mode of renewal-audit
///
/// Each command validates its own inputs, does its work, and reports the
/// process exit code it wants. Run-level failures are returned as errors and
/// mapped to the fatal exit code by `main`.
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// - `Ok(code)` with the exit code derived from the run
    /// - `Err(anyhow::Error)` if the run could not complete
    fn execute(&self) -> Result<u8>;

    /// Get a human-readable name for this command (for logging/debugging)
    fn name(&self) -> &'static str;
}
