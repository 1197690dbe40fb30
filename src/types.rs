use chrono::{DateTime, Utc};
use serde::Serialize;

/// A benchmark the server knows how to run, selected by a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    WriteRdma,
    ReadRdma,
    ReadRdmaFiltered,
}

impl Action {
    /// Mode arguments passed to the server after `-e <size>`.
    pub fn mode_args(self) -> &'static [&'static str] {
        match self {
            Action::WriteRdma => &["-w"],
            Action::ReadRdma => &["-r"],
            Action::ReadRdmaFiltered => &["-r", "-f"],
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Action::WriteRdma => "--write-rdma",
            Action::ReadRdma => "--read-rdma",
            Action::ReadRdmaFiltered => "--read-rdma-filtered",
        }
    }
}

/// Samples and mean for one payload size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeAverage {
    pub size: u32,
    pub samples: Vec<f64>,
    pub mean: f64,
}

/// Everything one sweep produced, as emitted by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub action: Action,
    pub recorded_at: DateTime<Utc>,
    pub repetitions: usize,
    pub results: Vec<SizeAverage>,
}
