//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format date in full format (like "January 5, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Calendar date only, as used in `datetime` attributes and sitemaps
pub fn date_ymd<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// Format a date for RSS `pubDate` (RFC 2822)
pub fn date_rfc2822<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_full_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(full_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_date_xml() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(date_xml(&date), "2024-06-01T00:00:00.000+00:00");
        assert_eq!(date_ymd(&date), "2024-06-01");
    }

    #[test]
    fn test_date_rfc2822() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(date_rfc2822(&date), "Sat, 1 Jun 2024 00:00:00 +0000");
    }
}
