//! Output formatting helpers shared by the report writers.

use std::env;
use std::io::IsTerminal;

/// Render a dollar amount in compact form: `$35.30M`, `$176.5K`, `$42.00`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{sign}${:.2}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}${:.1}K", magnitude / 1_000.0)
    } else {
        format!("{sign}${magnitude:.2}")
    }
}

/// Render a count with thousands separators: `200,000`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Apply this mode globally to `colored` output.
    pub fn apply(&self) {
        match self {
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
            Self::Auto => {
                if !detect_color_support() {
                    colored::control::set_override(false);
                }
            }
        }
    }
}

fn detect_color_support() -> bool {
    // NO_COLOR wins (per no-color.org), then TERM=dumb, then tty detection
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_scales_with_magnitude() {
        assert_eq!(format_currency(35_295_323.56), "$35.30M");
        assert_eq!(format_currency(756_000.0), "$756.0K");
        assert_eq!(format_currency(176.48), "$176.48");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn currency_handles_negative_npv() {
        assert_eq!(format_currency(-2_300_000.0), "-$2.30M");
        assert_eq!(format_currency(-950.0), "-$950.00");
    }

    #[test]
    fn exact_boundaries() {
        assert_eq!(format_currency(1_000_000.0), "$1.00M");
        assert_eq!(format_currency(1_000.0), "$1.0K");
        assert_eq!(format_currency(999.99), "$999.99");
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(200_000), "200,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn never_mode_disables_color() {
        assert!(!ColorMode::Never.should_use_color());
        assert!(ColorMode::Always.should_use_color());
    }
}
