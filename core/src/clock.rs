use alloc::format;
use alloc::string::String;

use crate::*;

/// Renders elapsed game time as `MM:SS`, or `HH:MM:SS` once an hour has passed.
pub fn format_elapsed(elapsed: Millis) -> String {
    let total_secs = elapsed / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(999), "00:00");
        assert_eq!(format_elapsed(61_000), "01:01");
        assert_eq!(format_elapsed(3_599_000), "59:59");
    }

    #[test]
    fn hours_appear_after_one_hour() {
        assert_eq!(format_elapsed(3_600_000), "01:00:00");
        assert_eq!(format_elapsed(90_061_000), "25:01:01");
    }
}
