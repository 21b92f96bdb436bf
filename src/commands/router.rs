// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{AuditCommand, Command, ConfigExampleCommand};
use crate::Args;

/// CommandRouter determines which Command to execute based on CLI arguments
///
/// Routing priority:
/// 1. Example configuration generation (--config-example)
/// 2. Renewal audit (default)
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    pub fn route(args: Args) -> Box<dyn Command> {
        if let Some(path) = args.config_example.clone() {
            return Box::new(ConfigExampleCommand::new(path));
        }

        Box::new(AuditCommand::new(args))
    }
}
