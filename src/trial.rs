use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Result;
use tracing::trace;

use crate::errors::BenchError;
use crate::parse::extract_elapsed;
use crate::types::Action;

/// Runs a single trial and reports its elapsed time.
pub trait TrialRunner {
    fn run_trial(&mut self, action: Action, size: u32) -> Result<f64>;
}

/// Spawns the benchmark server once per trial and scrapes its stdout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    marker: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            marker: marker.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for one trial: `-e <size>` followed by the action's mode flags.
    pub fn trial_args(action: Action, size: u32) -> Vec<String> {
        let mut args = vec!["-e".to_string(), size.to_string()];
        args.extend(action.mode_args().iter().map(|a| a.to_string()));
        args
    }
}

impl TrialRunner for ProcessRunner {
    fn run_trial(&mut self, action: Action, size: u32) -> Result<f64> {
        let args = Self::trial_args(action, size);
        trace!(program = %self.program.display(), ?args, "spawning trial");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BenchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BenchError::TrialFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_elapsed(&stdout, &self.marker)
    }
}
