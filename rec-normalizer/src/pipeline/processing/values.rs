use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use rec_core::domain::RegistrationStatus;

/// Extract a trimmed, non-empty string from a raw value. Numbers are
/// stringified; everything else is treated as absent.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a raw date value.
///
/// Accepts ISO (`YYYY-MM-DD`), US slash format (`MM/DD/YY` or
/// `MM/DD/YYYY`), bare "Month Day" text (assumed current year), and a few
/// generic fallbacks. Two-digit years are always read as 2000+YY; pre-2000
/// data would mis-date (accepted limitation).
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(date) = parse_slash_date(text) {
        return Some(date);
    }
    if let Some(date) = parse_month_day(text) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for fmt in ["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    warn!("Unparseable date text: '{}'", text);
    None
}

fn parse_slash_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let month: u32 = parts[0].trim().parse().ok()?;
    let day: u32 = parts[1].trim().parse().ok()?;
    let year_raw: i32 = parts[2].trim().parse().ok()?;
    let year = if year_raw < 100 { 2000 + year_raw } else { year_raw };
    NaiveDate::from_ymd_opt(year, month, day)
}

static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)([A-Za-z]+)\.?\s+(\d{1,2})$").unwrap());

fn parse_month_day(text: &str) -> Option<NaiveDate> {
    let caps = MONTH_DAY.captures(text)?;
    let month = month_from_name(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    NaiveDate::from_ymd_opt(Utc::now().year(), month, day)
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(0..3)?;
    let month = match prefix {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

static TIME_WITH_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(am|pm)?\s*$").unwrap());
static TIME_HOUR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{1,2})\s*(am|pm)\s*$").unwrap());

/// Normalize a time value to a 12-hour `H:MM AM/PM` display string.
///
/// Accepts `H:MM am/pm`, bare `H:MM` (read as 24-hour), and `H am/pm`.
/// Hour 0 displays as 12 AM; hour 12 stays 12 PM. Text that matches no
/// recognized shape is returned unchanged so the caller can still see the
/// original.
pub fn normalize_time(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        _ => return None,
    };
    if text.trim().is_empty() {
        return None;
    }

    if let Some(caps) = TIME_WITH_MINUTES.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour <= 23 && minute <= 59 {
            let meridiem = caps.get(3).map(|m| m.as_str().to_uppercase());
            return Some(to_display_time(hour, minute, meridiem));
        }
    }
    if let Some(caps) = TIME_HOUR_ONLY.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        if hour <= 23 {
            let meridiem = caps[2].to_uppercase();
            return Some(to_display_time(hour, 0, Some(meridiem)));
        }
    }

    debug!("Unrecognized time format, returning as-is: '{}'", text);
    Some(text.clone())
}

fn to_display_time(hour: u32, minute: u32, meridiem: Option<String>) -> String {
    let (display_hour, meridiem) = match meridiem {
        Some(m) => {
            let h = if hour == 0 {
                12
            } else if hour > 12 {
                hour - 12
            } else {
                hour
            };
            (h, m)
        }
        // No meridiem: interpret as 24-hour.
        None => {
            if hour == 0 {
                (12, "AM".to_string())
            } else if hour < 12 {
                (hour, "AM".to_string())
            } else if hour == 12 {
                (12, "PM".to_string())
            } else {
                (hour - 12, "PM".to_string())
            }
        }
    };
    format!("{}:{:02} {}", display_hour, minute, meridiem)
}

// Scanned Mon -> Sun; each alias list goes from the most specific spelling
// down so dedup keeps one entry per day.
const DAY_TABLE: &[(&str, &[&str])] = &[
    ("Mon", &["monday", "mon"]),
    ("Tue", &["tuesday", "tues", "tue"]),
    ("Wed", &["wednesday", "weds", "wed"]),
    ("Thu", &["thursday", "thurs", "thur", "thu"]),
    ("Fri", &["friday", "fri"]),
    ("Sat", &["saturday", "sat"]),
    ("Sun", &["sunday", "sun"]),
];

/// Normalize a days-of-week value into deduplicated 3-letter codes.
///
/// Array input passes through (deduplicated), so already-normalized values
/// are a fixed point. Free text is matched by substring against full
/// names, 3-letter codes, and common alternate spellings.
pub fn normalize_days_of_week(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => {
            let mut days = Vec::new();
            for item in items {
                if let Some(s) = item.as_str() {
                    if !days.iter().any(|d| d == s) {
                        days.push(s.to_string());
                    }
                }
            }
            days
        }
        Value::String(text) => {
            let lower = text.to_lowercase();
            let mut days = Vec::new();
            for (code, aliases) in DAY_TABLE {
                if aliases.iter().any(|alias| lower.contains(alias)) {
                    days.push((*code).to_string());
                }
            }
            days
        }
        _ => Vec::new(),
    }
}

static COST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d,]*\.?\d*").unwrap());

/// Normalize a cost value to a non-negative number.
///
/// Numeric input passes through (floored at zero); "free"/"no cost" text
/// maps to 0; otherwise the first numeric substring is parsed with commas
/// stripped. Totally unparseable input yields 0, never an error.
pub fn normalize_cost(value: &Value) -> f64 {
    match value {
        Value::Number(n) => {
            let cost = n.as_f64().unwrap_or(0.0);
            if cost.is_finite() && cost > 0.0 {
                cost
            } else {
                0.0
            }
        }
        Value::String(s) => {
            let lower = s.to_lowercase();
            if lower.contains("free") || lower.contains("no cost") {
                return 0.0;
            }
            match COST_NUMBER.find(&lower) {
                Some(m) => m
                    .as_str()
                    .replace(',', "")
                    .parse::<f64>()
                    .ok()
                    .filter(|c| c.is_finite() && *c >= 0.0)
                    .unwrap_or(0.0),
                None => {
                    debug!("Unparseable cost text, defaulting to 0: '{}'", s);
                    0.0
                }
            }
        }
        _ => 0.0,
    }
}

/// Generic integer parse; `None` on anything unparseable.
pub fn normalize_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Integer parse restricted to the supported child age band [0, 18];
/// out-of-range values normalize to `None`.
pub fn normalize_age(value: &Value) -> Option<u8> {
    let age = normalize_number(value)?;
    if (0..=18).contains(&age) {
        Some(age as u8)
    } else {
        debug!("Age {} outside supported range [0, 18], dropping", age);
        None
    }
}

/// Non-negative spot count; negative or unparseable values become `None`.
pub fn normalize_spots(value: &Value) -> Option<u32> {
    normalize_number(value).filter(|n| *n >= 0).map(|n| n as u32)
}

// Ordered, first-match-wins: Open before Full before Closed before
// Waitlist, so mixed wording resolves to the earlier status.
const STATUS_KEYWORDS: &[(&[&str], RegistrationStatus)] = &[
    (&["open", "available", "sign up"], RegistrationStatus::Open),
    (&["full", "sold out"], RegistrationStatus::Full),
    (&["closed", "ended"], RegistrationStatus::Closed),
    (&["waitlist", "wait list"], RegistrationStatus::Waitlist),
];

/// Classify a registration-status string by keyword.
pub fn normalize_registration_status(value: &Value) -> RegistrationStatus {
    let text = match value {
        Value::String(s) => s.to_lowercase(),
        _ => return RegistrationStatus::Unknown,
    };
    for (keywords, status) in STATUS_KEYWORDS {
        if keywords.iter().any(|k| text.contains(k)) {
            return *status;
        }
    }
    RegistrationStatus::Unknown
}

/// Validate a registration URL, repairing scheme-less values by prepending
/// `https://`. Returns `None` (with a warning) when the text cannot be made
/// into a well-formed URL.
pub fn normalize_url(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }

    if Url::parse(text).is_ok() {
        return Some(text.to_string());
    }
    let repaired = format!("https://{}", text);
    if Url::parse(&repaired).is_ok() {
        return Some(repaired);
    }

    warn!("Invalid registration URL, dropping: '{}'", text);
    None
}

// Ordered age-range patterns; the first one that matches anywhere in the
// combined text wins.
static AGE_RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d{1,2})\s*-\s*(\d{1,2})\s*years",
        r"(?i)(\d{1,2})\s+to\s+(\d{1,2})\s+years",
        r"(?i)ages?\s+(\d{1,2})\s*-\s*(\d{1,2})",
        r"(?i)\((\d{1,2})\s*-\s*(\d{1,2})\s*yrs?\)",
        r"(?i)ages?\s+(\d{1,2})\s+to\s+(\d{1,2})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const AGE_TEXT_FIELDS: &[&str] = &[
    "name",
    "description",
    "category",
    "subcategory",
    "ageRestrictions",
];

/// Search a raw record's text fields for an age range like "5-8 years" or
/// "ages 3 to 6". The first matching pattern wins; the result is accepted
/// only when `0 <= min <= max <= 18`.
pub fn extract_age_range(raw: &Value) -> Option<(u8, u8)> {
    let text = AGE_TEXT_FIELDS
        .iter()
        .filter_map(|field| raw.get(field).and_then(|v| v.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }

    for pattern in AGE_RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let min: u8 = caps[1].parse().ok()?;
            let max: u8 = caps[2].parse().ok()?;
            if min <= max && max <= 18 {
                return Some((min, max));
            }
            debug!("Rejected out-of-range age text match: {}-{}", min, max);
            return None;
        }
    }
    None
}

/// Render a display range like "Sep 15 - Oct 20"; empty when either side
/// is missing.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!(
            "{} {} - {} {}",
            start.format("%b"),
            start.day(),
            end.format("%b"),
            end.day()
        ),
        _ => String::new(),
    }
}

const ID_FIELDS: &[&str] = &[
    "courseId",
    "course_id",
    "activityId",
    "activity_id",
    "externalId",
    "external_id",
    "id",
];

/// Produce a stable external ID for a raw record.
///
/// Prefers an explicit course/activity/generic id field; otherwise slugs
/// the name plus the start date (or the current timestamp when no date is
/// known), truncated to 50 characters. Two same-named activities on the
/// same nominal date without a source id will collide (accepted
/// limitation).
pub fn generate_external_id(raw: &Value, name: &str, date_start: Option<NaiveDate>) -> String {
    for field in ID_FIELDS {
        if let Some(id) = raw.get(field).and_then(|v| value_to_string(v)) {
            return id;
        }
    }

    let suffix = match date_start {
        Some(date) => date.format("%Y%m%d").to_string(),
        None => Utc::now().timestamp().to_string(),
    };
    let mut slug = generate_slug(&format!("{} {}", name, suffix));
    slug.truncate(50);
    slug
}

/// URL-friendly slug: lowercase alphanumerics joined by single hyphens.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    slug.trim_matches('-').to_string()
}
