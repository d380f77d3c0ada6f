use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error, Deserialize, Deserializer};
use serde_with::DeserializeAs;

/// Apple's formatted date representation, e.g. `2019-03-01 10:00:00 Etc/GMT`.
///
/// Missing, null and empty values decode to `None`.
pub(crate) struct AppleDateFormat;

impl<'de> DeserializeAs<'de, Option<DateTime<Utc>>> for AppleDateFormat {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_apple_date(s).map(Some).map_err(D::Error::custom),
        }
    }
}

pub(crate) fn parse_apple_date(s: &str) -> Result<DateTime<Utc>, String> {
    // "Etc/GMT" first, since it also ends in "GMT".
    let naive_part = ["Etc/GMT", "GMT", "UTC"]
        .iter()
        .find_map(|zone| s.strip_suffix(zone))
        .unwrap_or(s)
        .trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| format!("unrecognized App Store date format: {s:?}"))
}

#[derive(Debug, Deserialize, PartialEq)]
pub(crate) enum Environment {
    Sandbox,
    Production,

    #[serde(untagged)]
    Unknown(String),
}
