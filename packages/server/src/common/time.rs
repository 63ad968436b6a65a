//! Time helpers shared across the API surface.
//!
//! Slot times travel on the wire as `HH:MM`; chrono's default `NaiveTime`
//! serde format is `HH:MM:SS`, so the wire types opt into the serializers
//! below.

use chrono::{Datelike, NaiveDate, NaiveTime};

const HHMM: &str = "%H:%M";

const WEEKDAYS_KR: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM).to_string()
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, HHMM)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

/// Korean display date, e.g. "8월 5일 (수)".
pub fn korean_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_KR[date.weekday().num_days_from_sunday() as usize];
    format!("{}월 {}일 ({})", date.month(), date.day(), weekday)
}

/// `#[serde(with = "hhmm")]` for `NaiveTime` fields.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(D::Error::custom)
    }
}

/// `#[serde(with = "hhmm_option")]` for `Option<NaiveTime>` fields.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&super::format_hhmm(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| super::parse_hhmm(&s).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_wire_formats() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_hhmm("14:30").unwrap(), expected);
        assert_eq!(parse_hhmm("14:30:00").unwrap(), expected);
        assert!(parse_hhmm("25:00").is_err());
    }

    #[test]
    fn formats_without_seconds() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(format_hhmm(time), "09:00");
    }

    #[test]
    fn korean_date_includes_weekday() {
        // 2025-06-02 is a Monday
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(korean_date(date), "6월 2일 (월)");
    }
}
