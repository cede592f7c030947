use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
const CANONICAL_TIME: &str = "%Y-%m-%d %H:%M";

/// Layouts carrying a numeric UTC offset; rendered in that offset.
const OFFSET_LAYOUTS: [&str; 1] = ["%d %b %Y %H:%M:%S %z"];

/// Layouts without zone information.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%b-%d %H:%M",
    "%d-%b-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_ONLY_LAYOUT: &str = "%Y-%m-%d";

/// Render a raw byte count with binary units: `"1.50 KiB"`, `"44.8 MiB"`, `"845 MiB"`.
///
/// Unparseable or non-finite input gives `"0"`, anything below one byte gives `"0 B"`.
pub fn format_size(raw: &str) -> String {
    let bytes = match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return "0".to_string(),
    };
    if bytes < 1.0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let exp = ((bytes.ln() / base.ln()) as usize).min(SIZE_UNITS.len() - 1);
    let value = bytes / base.powi(exp as i32);
    let unit = SIZE_UNITS[exp];

    if value < 10.0 {
        format!("{value:.2} {unit}")
    } else if value < 100.0 {
        format!("{value:.1} {unit}")
    } else {
        format!("{value:.0} {unit}")
    }
}

/// Reformat a listing timestamp as `YYYY-MM-DD HH:MM`.
///
/// Never fails: input matching none of the known layouts is returned as is.
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();

    for layout in OFFSET_LAYOUTS {
        if let Ok(stamp) = DateTime::parse_from_str(trimmed, layout) {
            return stamp.format(CANONICAL_TIME).to_string();
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return stamp.format(CANONICAL_TIME).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_ONLY_LAYOUT) {
        return format!("{} 00:00", date.format(DATE_ONLY_LAYOUT));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return stamp.format(CANONICAL_TIME).to_string();
    }

    raw.to_string()
}
