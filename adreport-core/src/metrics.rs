//! Derived metrics: week-over-week change, ACoS bands and display formatting

use serde::Serialize;

/// Placeholder shown for values that are not applicable
pub const NOT_APPLICABLE: &str = "—";

/// ACoS below this is good
pub const ACOS_GOOD: f64 = 0.35;
/// ACoS up to and including this is a warning; above is critical
pub const ACOS_WARNING: f64 = 0.55;

/// Relative change from `previous` to `current`; `None` when `previous` is 0
pub fn wow_pct(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs())
}

/// Absolute difference `current - previous` of two optional rates
pub fn rate_delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

/// Relative change of a rate, used for ACoS week-over-week
pub fn rate_pct_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let delta = rate_delta(current, previous)?;
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    Some(delta / previous)
}

/// Three-band ACoS classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcosBand {
    Good,
    Warning,
    Critical,
    Unknown,
}

/// Classify ACoS with the default 35% / 55% bands
pub fn classify_acos(acos: Option<f64>) -> AcosBand {
    classify_acos_with(acos, ACOS_GOOD, ACOS_WARNING)
}

pub fn classify_acos_with(acos: Option<f64>, good_below: f64, warning_up_to: f64) -> AcosBand {
    match acos {
        None => AcosBand::Unknown,
        Some(a) if a < good_below => AcosBand::Good,
        Some(a) if a <= warning_up_to => AcosBand::Warning,
        Some(_) => AcosBand::Critical,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// A week-over-week change ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub pct: Option<f64>,
    pub direction: Direction,
    pub favorable: bool,
    /// e.g. `+12.5%`, or `N/A` when there is no baseline
    pub label: String,
}

impl Trend {
    /// Trend for a measure where growth is good
    pub fn from_pct(pct: Option<f64>) -> Self {
        Self::build(pct, false)
    }

    /// Trend for a measure where a decrease is good (ad spend)
    pub fn from_pct_inverted(pct: Option<f64>) -> Self {
        Self::build(pct, true)
    }

    fn build(pct: Option<f64>, invert: bool) -> Self {
        match pct {
            None => Self {
                pct: None,
                direction: Direction::Flat,
                favorable: false,
                label: "N/A".to_string(),
            },
            Some(p) => {
                let up = p >= 0.0;
                Self {
                    pct: Some(p),
                    direction: if up { Direction::Up } else { Direction::Down },
                    favorable: up != invert,
                    label: fmt_signed_pct(p, 1),
                }
            }
        }
    }

    /// ACoS trend: relative change label, favourable when ACoS did not rise
    pub fn for_acos(current: Option<f64>, previous: Option<f64>) -> Self {
        let Some(delta) = rate_delta(current, previous) else {
            return Self {
                pct: None,
                direction: Direction::Flat,
                favorable: false,
                label: NOT_APPLICABLE.to_string(),
            };
        };
        let pct = rate_pct_change(current, previous);
        Self {
            pct,
            direction: if delta >= 0.0 { Direction::Up } else { Direction::Down },
            favorable: delta <= 0.0,
            label: pct.map_or_else(|| NOT_APPLICABLE.to_string(), |p| fmt_signed_pct(p, 1)),
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self.direction {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Flat => NOT_APPLICABLE,
        }
    }
}

/// Round to `decimals` places with ties away from zero, so `62.5` becomes `63`.
///
/// `format!("{:.0}")` rounds ties to even; every displayed figure goes
/// through this first. Negative zero comes back as `0.0`.
pub fn round_half_up(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale + 0.0
}

fn fmt_signed_pct(p: f64, decimals: usize) -> String {
    let sign = if p >= 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, decimals, round_half_up(p * 100.0, decimals))
}

/// Format a decimal rate as a percentage, e.g. `0.44` -> `44.0%`
pub fn fmt_pct(value: Option<f64>, decimals: usize) -> String {
    match value {
        None => NOT_APPLICABLE.to_string(),
        Some(v) => format!("{:.*}%", decimals, round_half_up(v * 100.0, decimals)),
    }
}

/// Format ROAS as a multiplier, e.g. `2.27x`. Zero and `None` show as not applicable.
pub fn fmt_roas(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.2}x", round_half_up(v, 2)),
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// Format a dollar amount with thousands separators, e.g. `$18,720`
pub fn fmt_dollar(value: f64, decimals: usize) -> String {
    let body = group_thousands(&format!("{:.*}", decimals, round_half_up(value.abs(), decimals)));
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format a count rounded to a whole number, e.g. `1,204`
pub fn fmt_count(value: f64) -> String {
    let rounded = value.round();
    let body = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Insert commas into the integer part of an unsigned decimal string
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
