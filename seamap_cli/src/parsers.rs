use std::time::Duration;

use jiff::{SignedDuration, Span, SpanRelativeTo};

fn parse_signed_duration(input: &str) -> Option<SignedDuration> {
    if let Ok(duration) = input.parse::<SignedDuration>() {
        return Some(duration);
    }

    if let Ok(duration) = input
        .parse::<Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Some(duration);
    }

    // Bare numbers are milliseconds, like the poll interval in the config file
    input.parse::<i64>().ok().map(SignedDuration::from_millis)
}

/// Accepts `5s`, `500ms`, `PT5S` or a plain number of milliseconds.
pub fn parse_poll_interval(input: &str) -> Result<Duration, String> {
    let duration = parse_signed_duration(input.trim())
        .ok_or_else(|| format!("Invalid duration: {input}"))?;

    if duration.is_zero() || duration.is_negative() {
        return Err(String::from("Poll interval must be positive"));
    }

    Duration::try_from(duration).map_err(|err| err.to_string())
}
