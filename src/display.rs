use owo_colors::{OwoColorize, Stream, Style};

use crate::types::{Action, ActionReport};

const SIGNIFICANT_DIGITS: i32 = 12;

/// Format one result line, e.g. `avg = 2.0` or `avg = 1.23e-05`.
pub fn format_average(mean: f64) -> String {
    format!("avg = {}", format_float(mean))
}

/// `%.12g`, with `.0` appended when the result would otherwise read as an
/// integer. Exponents carry a sign and at least two digits.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // The exponent after rounding to the significant digits decides the style.
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        );
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
    let fixed = format!("{:.*}", decimals, value);
    let trimmed = trim_fraction(&fixed);
    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{}.0", trimmed)
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

fn style_error() -> Style {
    Style::new().red().bold()
}

/// Header written to stderr before each sweep when more than one runs.
pub fn format_sweep_header(action: Action) -> String {
    format!(
        "{}",
        format!("== {} ==", action.flag())
            .if_supports_color(Stream::Stderr, |s| s.bold())
    )
}

/// Prefix for fatal diagnostics on stderr.
pub fn format_error(message: &str) -> String {
    format!(
        "{} {}",
        "error:".if_supports_color(Stream::Stderr, |s| s.style(style_error())),
        message
    )
}

pub fn format_json(reports: &[ActionReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}
