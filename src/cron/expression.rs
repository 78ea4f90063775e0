use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use cron::Schedule;
use std::str::FromStr;

/// Next fire time strictly after `from`, in `from`'s timezone.
pub fn next_run_for<Tz: TimeZone>(expression: &str, from: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let schedule = parse(expression)?;
    schedule
        .after(from)
        .next()
        .ok_or_else(|| anyhow::anyhow!("No future occurrence for expression: {expression}"))
}

pub fn validate(expression: &str) -> Result<()> {
    parse(expression).map(|_| ())
}

fn parse(expression: &str) -> Result<Schedule> {
    let normalized = normalize_expression(expression)?;
    Schedule::from_str(&normalized).with_context(|| format!("Invalid cron expression: {expression}"))
}

fn normalize_expression(expression: &str) -> Result<String> {
    let expression = expression.trim();
    let field_count = expression.split_whitespace().count();

    match field_count {
        // standard crontab syntax: minute hour day month weekday
        5 => Ok(format!("0 {expression}")),
        // crate-native syntax includes seconds (+ optional year)
        6 | 7 => Ok(expression.to_string()),
        _ => anyhow::bail!(
            "Invalid cron expression: {expression} (expected 5, 6, or 7 fields, got {field_count})"
        ),
    }
}
