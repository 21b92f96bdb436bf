// ConfigExampleCommand - Write an example configuration file
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::config::AuditConfig;
use crate::Result;
use std::path::PathBuf;

/// ConfigExampleCommand writes the default settings as a commented TOML file
pub struct ConfigExampleCommand {
    path: PathBuf,
}

impl ConfigExampleCommand {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Command for ConfigExampleCommand {
    fn execute(&self) -> Result<u8> {
        AuditConfig::create_example(&self.path)?;
        println!("✓ Example configuration saved to: {}", self.path.display());
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "ConfigExampleCommand"
    }
}
