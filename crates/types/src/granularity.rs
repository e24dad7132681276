use chrono::{Datelike, NaiveDate};

/// Trend bucket granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar date buckets
    Day,
    /// ISO week buckets (Monday start)
    Week,
    /// Calendar month buckets
    Month,
}

/// Error parsing granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseGranularityError;

impl std::fmt::Display for ParseGranularityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid granularity string")
    }
}

impl std::error::Error for ParseGranularityError {}

impl std::str::FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "d" => Ok(Granularity::Day),
            "week" | "w" => Ok(Granularity::Week),
            "month" | "m" => Ok(Granularity::Month),
            _ => Err(ParseGranularityError),
        }
    }
}

impl Granularity {
    /// Returns the start date of the bucket containing `date`.
    ///
    /// Day buckets start on the date itself, week buckets on the ISO week
    /// Monday, month buckets on the first of the month.
    #[must_use]
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let back = date.weekday().num_days_from_monday();
                date - chrono::Duration::days(i64::from(back))
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}
