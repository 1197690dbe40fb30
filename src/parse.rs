use anyhow::Result;

use crate::errors::BenchError;

pub const DEFAULT_MARKER: &str = "elapsed";

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ':' || c == '='
}

/// Extract the elapsed time reported after the first occurrence of `marker`.
///
/// Separators between the marker and the value (whitespace, `:` and `=`) are
/// skipped, so `elapsed: 1.5`, `elapsed=1.5` and `elapsed 1.5` all yield 1.5.
/// An occurrence only counts when a separator follows it (or the marker ends
/// with one), so `elapsed_time: 5` does not match `elapsed`. The value is the
/// whitespace-delimited token that follows.
pub fn extract_elapsed(output: &str, marker: &str) -> Result<f64> {
    let not_found = || BenchError::MarkerNotFound {
        marker: marker.to_string(),
    };

    let marker_ends_with_separator = marker.ends_with(is_separator);
    let rest = output
        .match_indices(marker)
        .map(|(start, _)| &output[start + marker.len()..])
        .find(|rest| marker_ends_with_separator || rest.starts_with(is_separator))
        .ok_or_else(not_found)?;

    let token = rest
        .trim_start_matches(is_separator)
        .split_whitespace()
        .next()
        .unwrap_or("");
    if token.is_empty() {
        return Err(not_found().into());
    }

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BenchError::InvalidElapsed {
            token: token.to_string(),
        }
        .into()),
    }
}

/// Arithmetic mean of a sample set.
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(BenchError::EmptySampleSet.into());
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}
