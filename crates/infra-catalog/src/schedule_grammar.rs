// Parses the string grammar used by a schedule field in `soko.yml`:
// `"*"` is the wildcard; otherwise a comma-separated list of tokens, each
// trimmed of surrounding whitespace. Tokens that don't parse as the target
// type are silently dropped — including an entire field reducing to an
// empty (but present) set, which never matches anything.

use chrono::Weekday;

pub fn parse_numeric_field(raw: &str) -> Option<Vec<u32>> {
    let raw = raw.trim();
    if raw == "*" {
        return None;
    }
    Some(
        raw.split(',')
            .filter_map(|tok| tok.trim().parse::<u32>().ok())
            .collect(),
    )
}

pub fn parse_day_field(raw: &str) -> Option<Vec<Weekday>> {
    let raw = raw.trim();
    if raw == "*" {
        return None;
    }
    Some(
        raw.split(',')
            .filter_map(|tok| parse_weekday_name(tok.trim()))
            .collect(),
    )
}

/// Full English weekday names only, case-insensitive. Abbreviations
/// (`"mon"`, `"fri"`) are deliberately rejected.
fn parse_weekday_name(token: &str) -> Option<Weekday> {
    match token.to_ascii_lowercase().as_str() {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}
