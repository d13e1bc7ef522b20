//! Clock-token parsing and formatting utilities

/// Parse a transcoder clock token (`HH:MM:SS.fff`) into seconds.
///
/// The token must have exactly three colon-separated numeric fields; each
/// field is read as a float, so fractional seconds like `00:17:05.23` carry
/// through. Returns `None` for anything else (`N/A`, missing fields, junk).
pub fn parse_clock(token: &str) -> Option<f64> {
    let parts: Vec<&str> = token.trim().split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds as an `HH:MM:SS.mmm` clock string.
pub fn format_clock(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u32;
    let minutes = ((seconds % 3600.0) / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    let milliseconds = ((seconds % 1.0) * 1000.0) as u32;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
}
