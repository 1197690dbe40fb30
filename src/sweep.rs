use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::display::format_average;
use crate::parse::mean;
use crate::trial::TrialRunner;
use crate::types::{Action, SizeAverage};

/// Run `action` over every configured size, `config.repetitions` trials each.
///
/// When `out` is given, an `avg = <mean>` line is written as soon as each size
/// completes. The first failing trial aborts the sweep; lines for sizes that
/// already completed stay written.
pub fn run_sweep<R: TrialRunner>(
    action: Action,
    config: &BenchConfig,
    runner: &mut R,
    mut out: Option<&mut dyn Write>,
) -> Result<Vec<SizeAverage>> {
    let mut results = Vec::with_capacity(config.sizes.len());

    for &size in &config.sizes {
        let mut samples = Vec::with_capacity(config.repetitions);
        for repetition in 0..config.repetitions {
            let elapsed = runner.run_trial(action, size)?;
            debug!(?action, size, repetition, elapsed, "trial complete");
            samples.push(elapsed);
        }

        let mean = mean(&samples)?;
        info!(?action, size, mean, "size complete");

        if let Some(out) = out.as_deref_mut() {
            writeln!(out, "{}", format_average(mean))?;
            out.flush()?;
        }

        results.push(SizeAverage {
            size,
            samples,
            mean,
        });
    }

    Ok(results)
}
