// Run Summary - Tally of a presented report and the derived exit code

/// Exit code for failures that stop the whole run
pub const FATAL_EXIT_CODE: u8 = 255;

/// Largest tally exit code; 255 stays reserved for fatal failures
const MAX_TALLY_EXIT_CODE: u64 = 254;

/// Counts over the records actually shown to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub shown: usize,
    pub expired: usize,
    pub errors: usize,
    pub skipped: usize,
    pub invalid: usize,
}

impl RunSummary {
    /// Expired records plus error messages plus skipped invalid files
    pub fn problem_count(&self) -> u64 {
        (self.expired + self.errors + self.invalid) as u64
    }

    pub fn exit_code(&self) -> u8 {
        self.problem_count().min(MAX_TALLY_EXIT_CODE) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_run_exits_zero() {
        let summary = RunSummary {
            shown: 4,
            skipped: 2,
            ..Default::default()
        };
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_exit_code_tallies_problems() {
        let summary = RunSummary {
            shown: 3,
            expired: 1,
            errors: 3,
            skipped: 5,
            invalid: 1,
        };
        assert_eq!(summary.exit_code(), 5);
    }

    #[test]
    fn test_exit_code_never_reaches_fatal() {
        let summary = RunSummary {
            errors: 10_000,
            ..Default::default()
        };
        assert_eq!(summary.exit_code(), 254);
        assert_ne!(summary.exit_code(), FATAL_EXIT_CODE);
    }
}
