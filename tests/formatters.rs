#[cfg(test)]
mod tests {
    use chrono::Duration;
    use stula::libs::formatter::{format_duration, format_focus, format_minutes};

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
    }

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(&Duration::minutes(30)), "00:30");
        assert_eq!(format_duration(&Duration::minutes(59)), "00:59");
        assert_eq!(format_duration(&Duration::minutes(1)), "00:01");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration(&(Duration::hours(1) + Duration::minutes(30))), "01:30");
        assert_eq!(format_duration(&(Duration::hours(12) + Duration::minutes(5))), "12:05");
    }

    #[test]
    fn test_format_duration_negative_clamps_to_zero() {
        assert_eq!(format_duration(&Duration::minutes(-15)), "00:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(75), "01:15");
        assert_eq!(format_minutes(600), "10:00");
    }

    #[test]
    fn test_format_focus_whole_percentages() {
        assert_eq!(format_focus(1.0), "100%");
        assert_eq!(format_focus(0.8), "80%");
        assert_eq!(format_focus(0.0), "0%");
    }

    #[test]
    fn test_format_focus_rounds() {
        assert_eq!(format_focus(0.666), "67%");
        assert_eq!(format_focus(0.333), "33%");
    }
}
