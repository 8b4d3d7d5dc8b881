use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn axis_date_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 2_592_000 => format!("{}d ago", s / 86_400),
        s => format!("{}mo ago", s / 2_592_000),
    }
}

pub fn time_ago_millis(timestamp_ms: i64, now: DateTime<Utc>) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(then) => time_ago(then, now),
        None => "Just now".to_string(),
    }
}
