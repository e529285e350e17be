use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder shown for a missing reading.
pub const MISSING: &str = "-";

/// Icon category derived from forecast text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Thunder,
    Rain,
    PartlyCloudy,
    Cloudy,
    Clear,
    Windy,
    #[default]
    Unknown,
}

impl IconCategory {
    /// Classify free-form forecast text such as "Thundery Showers" or
    /// "Partly Cloudy (Day)".
    ///
    /// Case-insensitive substring match; the first rule that matches wins, in
    /// the order thunder, rain, partly, cloud, clear, wind.
    pub fn classify(text: &str) -> Self {
        const RULES: &[(&[&str], IconCategory)] = &[
            (&["thunder"], IconCategory::Thunder),
            (&["rain", "shower"], IconCategory::Rain),
            (&["partly"], IconCategory::PartlyCloudy),
            (&["cloud"], IconCategory::Cloudy),
            (&["clear", "fair", "sunny"], IconCategory::Clear),
            (&["wind"], IconCategory::Windy),
        ];

        let text = text.to_lowercase();
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| text.contains(n)))
            .map(|(_, category)| *category)
            .unwrap_or_default()
    }

    /// Glyph shown on the forecast card
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Thunder => "⛈️",
            Self::Rain => "🌧️",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁️",
            Self::Clear => "☀️",
            Self::Windy => "💨",
            Self::Unknown => "🌤️",
        }
    }

    /// Stable name used as a CSS class
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Thunder => "thunder",
            Self::Rain => "rain",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Clear => "clear",
            Self::Windy => "windy",
            Self::Unknown => "unknown",
        }
    }
}

/// A low/high pair where either end may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// `"low / high"`, with [`MISSING`] for each absent end.
    pub fn display(range: Option<&Range>) -> String {
        let bound = |v: Option<f64>| v.map_or_else(|| MISSING.to_string(), |v| v.to_string());
        let (low, high) = range.map_or((None, None), |r| (r.low, r.high));
        format!("{} / {}", bound(low), bound(high))
    }
}

/// One day of the outlook. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Date as sent by the API (normally `YYYY-MM-DD`).
    pub date: String,
    pub forecast: String,
    pub temperature: Option<Range>,
    pub wind_speed: Option<Range>,
    pub relative_humidity: Option<Range>,
}

impl ForecastDay {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.get(..10)?, "%Y-%m-%d").ok()
    }

    pub fn icon(&self) -> IconCategory {
        IconCategory::classify(&self.forecast)
    }
}

/// Forecast client errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Forecast endpoint returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No forecast data available")]
    EmptyForecastData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thunder_beats_rain() {
        assert_eq!(IconCategory::classify("Thundery Showers"), IconCategory::Thunder);
        assert_eq!(
            IconCategory::classify("Afternoon thunderstorms with heavy rain"),
            IconCategory::Thunder
        );
    }

    #[test]
    fn test_rain_and_showers() {
        assert_eq!(IconCategory::classify("Light Rain"), IconCategory::Rain);
        assert_eq!(IconCategory::classify("Passing Showers"), IconCategory::Rain);
    }

    #[test]
    fn test_partly_beats_cloudy() {
        assert_eq!(IconCategory::classify("Partly Cloudy (Day)"), IconCategory::PartlyCloudy);
        assert_eq!(IconCategory::classify("Cloudy"), IconCategory::Cloudy);
    }

    #[test]
    fn test_clear_and_fair() {
        assert_eq!(IconCategory::classify("Fair (Night)"), IconCategory::Clear);
        assert_eq!(IconCategory::classify("CLEAR"), IconCategory::Clear);
        assert_eq!(IconCategory::classify("Sunny"), IconCategory::Clear);
    }

    #[test]
    fn test_cloud_beats_wind() {
        assert_eq!(IconCategory::classify("Windy"), IconCategory::Windy);
        assert_eq!(IconCategory::classify("Cloudy and windy"), IconCategory::Cloudy);
    }

    #[test]
    fn test_unknown_defaults() {
        assert_eq!(IconCategory::classify("Hazy"), IconCategory::Unknown);
        assert_eq!(IconCategory::classify(""), IconCategory::Unknown);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(Range::display(Some(&Range::new(24.0, 33.0))), "24 / 33");
        assert_eq!(Range::display(None), "- / -");
        let half = Range {
            low: Some(60.0),
            high: None,
        };
        assert_eq!(Range::display(Some(&half)), "60 / -");
        assert_eq!(Range::display(Some(&Range::new(2.5, 10.0))), "2.5 / 10");
    }

    #[test]
    fn test_parsed_date() {
        let day = ForecastDay {
            date: "2026-10-17".into(),
            ..Default::default()
        };
        assert_eq!(day.parsed_date(), NaiveDate::from_ymd_opt(2026, 10, 17));

        let odd = ForecastDay {
            date: "tomorrow".into(),
            ..Default::default()
        };
        assert_eq!(odd.parsed_date(), None);
    }
}
