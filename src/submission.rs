/// Data structures for stored submissions
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Shown in place of empty fields and missing timestamps
pub const PLACEHOLDER: &str = "—";

/// A record entered through the popup form
///
/// Only new records are validated; stored fields may be missing or null and
/// load as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

/// Trimmed, validated form input that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    pub fn new(draft: SubmissionDraft, now: DateTime<Utc>) -> Submission {
        Submission {
            id: generate_id(now),
            name: draft.name,
            email: draft.email,
            message: draft.message,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build an id of the form `<unix-millis>-<random suffix>`
fn generate_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &random[..9])
}

/// Render a stored timestamp in the browser's local time zone
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

/// Render a stored timestamp as `YYYY-MM-DD HH:MM` in the given zone
///
/// Values that are not RFC 3339 (older records may carry locale strings)
/// are returned unchanged.
pub fn format_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return PLACEHOLDER.to_string();
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn display_or_placeholder(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SubmissionDraft {
        SubmissionDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 28, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_new_submission() {
        let submission = Submission::new(draft(), fixed_now());

        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hello");
        assert_eq!(submission.timestamp, "2024-10-28T10:30:00.000Z");
        assert!(submission.id.starts_with("1730111400000-"));
        assert_eq!(submission.id.len(), "1730111400000-".len() + 9);
    }

    #[test]
    fn test_ids_are_unique() {
        let now = fixed_now();
        let a = Submission::new(draft(), now);
        let b = Submission::new(draft(), now);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialization() {
        let submission = Submission::new(draft(), fixed_now());

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["timestamp"], "2024-10-28T10:30:00.000Z");

        let deserialized: Submission = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, submission);
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let json = r#"{"id":"1-abc","name":"A","email":"a@b.co","message":"m"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.timestamp, "");
    }

    #[test]
    fn test_deserialize_null_and_missing_fields() {
        let json = r#"{"id":"1-a","name":"A","message":null,"timestamp":null}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.email, "");
        assert_eq!(submission.message, "");
        assert_eq!(submission.timestamp, "");
        assert_eq!(display_or_placeholder(&submission.message), PLACEHOLDER);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp_in("2024-10-28T10:30:00.000Z", &Utc),
            "2024-10-28 10:30"
        );
        assert_eq!(format_timestamp_in("", &Utc), PLACEHOLDER);
        assert_eq!(format_timestamp_in("10/28/2024, 10:30:00 AM", &Utc), "10/28/2024, 10:30:00 AM");
    }

    #[test]
    fn test_display_or_placeholder() {
        assert_eq!(display_or_placeholder(""), PLACEHOLDER);
        assert_eq!(display_or_placeholder("Ada"), "Ada");
    }
}
