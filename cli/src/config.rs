use graph_paths_core::Budget;

use crate::args::{Cli, OrientationArgs, OutputFormat};
use crate::error::CliError;

/// Upper bound for `--max-steps`. Anything larger is indistinguishable from unbounded.
pub const MAX_STEPS_LIMIT: u64 = 1_000_000_000_000;

/// Runtime settings resolved from flags and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// 0 = unbounded.
    pub max_steps: u64,
    /// `Some(true)` forces directed, `Some(false)` undirected, `None` keeps the document's flag.
    pub directed: Option<bool>,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_steps: 0,
            directed: None,
            format: OutputFormat::Human,
        }
    }
}

impl Settings {
    pub fn resolve(cli: &Cli, orientation: OrientationArgs) -> Result<Self, CliError> {
        if cli.max_steps > MAX_STEPS_LIMIT {
            return Err(CliError::usage(format!(
                "--max-steps must be between 0 and {}, got {}",
                MAX_STEPS_LIMIT, cli.max_steps
            )));
        }

        let directed = match (orientation.directed, orientation.undirected) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        Ok(Self {
            max_steps: cli.max_steps,
            directed,
            format: cli.format,
        })
    }

    pub fn budget(&self) -> Budget {
        match self.max_steps {
            0 => Budget::unlimited(),
            n => Budget::steps(n),
        }
    }

    /// Orientation to run with, given the document's own flag.
    pub fn directed_or(&self, document_directed: bool) -> bool {
        self.directed.unwrap_or(document_directed)
    }
}
