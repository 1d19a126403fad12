// File: crates/plot-core/src/axis/tick.rs
// Summary: Interval selection ("nice numbers"), tick generation and tick formatting.

use super::AxisKind;
use chrono::{DateTime, TimeZone, Utc};

/// Rounds `raw` to a nice 1/2/5 x 10^n step.
pub(crate) fn nice_step(raw: f64) -> f64 {
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let exponent = raw.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Chooses a major step for a linear axis so labels stay readable
/// (roughly 5-10 majors on a typical plot area).
pub fn nice_interval(range: f64, available: f64, max_label_size: f64) -> f64 {
    let target = (available / max_label_size).clamp(2.0, 10.0);
    nice_step(range / target)
}

/// Major step for a log axis, in decades.
pub fn log_interval(range_decades: f64, available: f64) -> f64 {
    let target = (available / 60.0).clamp(2.0, 10.0);
    (range_decades / target).ceil().max(1.0)
}

/// Candidate date-time steps, in seconds.
const DATE_TIME_STEPS: [f64; 17] = [
    1.0,
    5.0,
    15.0,
    30.0,
    60.0,
    300.0,
    900.0,
    1800.0,
    3600.0,
    3.0 * 3600.0,
    6.0 * 3600.0,
    12.0 * 3600.0,
    86_400.0,
    7.0 * 86_400.0,
    30.0 * 86_400.0,
    90.0 * 86_400.0,
    365.0 * 86_400.0,
];

/// Major step for a date-time axis (values are seconds since the Unix epoch):
/// the smallest calendar-ish step that keeps labels apart.
pub fn date_time_interval(range_seconds: f64, available: f64) -> f64 {
    let target = (available / 90.0).clamp(2.0, 10.0);
    let raw = range_seconds / target;
    for step in DATE_TIME_STEPS {
        if step >= raw {
            return step;
        }
    }
    // beyond one year: whole multiples of years
    nice_step(raw / (365.0 * 86_400.0)) * 365.0 * 86_400.0
}

/// Minor step derived from the major step.
pub fn minor_from_major(major: f64, kind: &AxisKind) -> f64 {
    match kind {
        AxisKind::Logarithmic => major, // minor ticks handled per-decade by the renderer
        AxisKind::Category(_) => major,
        _ => major / 5.0,
    }
}

/// Tick positions covering [min, max] at multiples of `step`.
pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !step.is_finite() || !(max > min) {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let count = (last - first) as i64;
    if count < 0 || count > 10_000 {
        return Vec::new();
    }
    (0..=count).map(|i| (first + i as f64) * step).collect()
}

/// Formats a tick value with just enough precision for its step.
pub fn format_number(value: f64, step: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        2
    };
    let s = format!("{value:.decimals$}");
    // trim a superfluous trailing ".0"
    if decimals == 0 {
        s
    } else {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Converts a chrono timestamp to the axis value representation
/// (seconds since the Unix epoch).
pub fn date_time_to_value(t: DateTime<Utc>) -> f64 {
    t.timestamp() as f64 + f64::from(t.timestamp_subsec_millis()) / 1000.0
}

/// Inverse of `date_time_to_value`.
pub fn value_to_date_time(value: f64) -> Option<DateTime<Utc>> {
    let secs = value.floor() as i64;
    let millis = ((value - value.floor()) * 1000.0).round() as u32;
    Utc.timestamp_opt(secs, millis * 1_000_000).single()
}

/// Formats a date-time tick with granularity matched to the step.
pub fn format_date_time(value: f64, step: f64) -> String {
    let Some(t) = value_to_date_time(value) else {
        return String::new();
    };
    let fmt = if step < 60.0 {
        "%H:%M:%S"
    } else if step < 86_400.0 {
        "%H:%M"
    } else if step < 365.0 * 86_400.0 {
        "%Y-%m-%d"
    } else {
        "%Y"
    };
    t.format(fmt).to_string()
}
