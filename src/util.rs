/// `part / whole` as a rounded percentage, 0 when `whole` is 0
pub fn percentage(part: u32, whole: u32) -> u32 {
    match whole {
        0 => 0,
        positive => ((part as f64 / positive as f64) * 100.0).round() as u32,
    }
}

/// Formats seconds as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
