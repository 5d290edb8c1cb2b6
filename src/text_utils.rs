use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

pub const WORDS_PER_MINUTE: usize = 200;

/// Parses a strict `YYYY-MM-DD` date. Anything looser, or a date that does not
/// exist in the calendar, is rejected.
pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }

    if !DATE_REGEX.is_match(buf) {
        return Err(format!("expected a date in YYYY-MM-DD format, got `{}`", buf));
    }
    NaiveDate::parse_from_str(buf, "%Y-%m-%d")
        .map_err(|_| format!("`{}` is not a valid calendar date", buf))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text`, rounded up and never less than one.
pub fn reading_minutes(text: &str) -> u32 {
    let words = word_count(text);
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-09").unwrap();
        assert_eq!(format_date(&date), "2024-03-09");

        assert!(parse_date("2024-3-9").is_err());
        assert!(parse_date("2024-03-09T10:00:00").is_err());
        assert!(parse_date("March 9, 2024").is_err());
        assert!(parse_date(" 2024-03-09").is_err());
        assert!(parse_date("2023-02-29").unwrap_err().contains("calendar"));
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(""), 1);
        assert_eq!(reading_minutes("one two three"), 1);
        assert_eq!(reading_minutes(&"word ".repeat(200)), 1);
        assert_eq!(reading_minutes(&"word ".repeat(201)), 2);
        assert_eq!(reading_minutes(&"word\n".repeat(800)), 4);
    }
}
