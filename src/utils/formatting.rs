pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else if ms < 3_600_000 {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = ms / 3_600_000;
        let mins = (ms % 3_600_000) / 60_000;
        format!("{}h {}m", hours, mins)
    }
}

/// Human form of a schedule period, e.g. "every 24h 0m".
pub fn format_interval(secs: u64) -> String {
    format!("every {}", format_duration(secs.saturating_mul(1000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ranges() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(125_000), "2m 5s");
        assert_eq!(format_duration(3_660_000), "1h 1m");
    }

    #[test]
    fn test_format_interval_daily() {
        assert_eq!(format_interval(86_400), "every 24h 0m");
    }
}
