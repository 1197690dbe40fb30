use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Failed to start benchmark server {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Benchmark server {program} exited with {status}{}", format_stderr(.stderr))]
    TrialFailed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("No elapsed time marker '{marker}' in benchmark server output")]
    MarkerNotFound { marker: String },

    #[error("Elapsed time '{token}' is not a number")]
    InvalidElapsed { token: String },

    #[error("Cannot average an empty sample set")]
    EmptySampleSet,

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
