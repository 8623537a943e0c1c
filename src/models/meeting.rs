use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{generate_id, non_empty};

pub const DEFAULT_PLATFORM: &str = "Google Meet";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub platform: String,
    pub link: String,
    pub is_locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
}

impl Meeting {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    pub fn required_password(&self) -> Option<&str> {
        non_empty(self.access_password.as_deref())
    }

    /// Password guarding the meeting link. Unlocked meetings expose the link
    /// directly, and a locked meeting without a password is not gated.
    pub fn link_password(&self) -> Option<&str> {
        if self.is_locked {
            self.required_password()
        } else {
            None
        }
    }
}

/// Accepts RFC 3339 as well as the plain date and datetime forms the
/// remote database hands back. Zone-less values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub link: Option<String>,
    pub is_locked: Option<bool>,
    pub access_password: Option<String>,
}

impl MeetingDraft {
    pub fn is_ready(&self) -> bool {
        non_empty(self.title.as_deref()).is_some()
    }

    /// Returns `None` until the draft has a title. A missing date means now.
    pub fn build(&self) -> Option<Meeting> {
        let title = non_empty(self.title.as_deref())?;

        Some(Meeting {
            id: non_empty(self.id.as_deref())
                .map(str::to_string)
                .unwrap_or_else(generate_id),
            title: title.to_string(),
            date: non_empty(self.date.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            description: Some(self.description.clone().unwrap_or_default()),
            platform: non_empty(self.platform.as_deref())
                .unwrap_or(DEFAULT_PLATFORM)
                .to_string(),
            link: self.link.clone().unwrap_or_default(),
            is_locked: self.is_locked.unwrap_or(false),
            access_password: Some(self.access_password.clone().unwrap_or_default()),
        })
    }
}

impl From<&Meeting> for MeetingDraft {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: Some(meeting.id.clone()),
            title: Some(meeting.title.clone()),
            date: Some(meeting.date.clone()),
            description: meeting.description.clone(),
            platform: Some(meeting.platform.clone()),
            link: Some(meeting.link.clone()),
            is_locked: Some(meeting.is_locked),
            access_password: meeting.access_password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_remote_date_forms() {
        let plain = parse_timestamp("2024-03-10").expect("plain date");
        assert_eq!((plain.year(), plain.month(), plain.day()), (2024, 3, 10));

        let mysql = parse_timestamp("2024-03-10 18:30:00").expect("mysql datetime");
        assert_eq!(mysql.hour(), 18);

        let iso = parse_timestamp("2024-03-10T18:30:00.000Z").expect("iso");
        assert_eq!(iso, mysql);

        let offset = parse_timestamp("2024-03-10T20:30:00+02:00").expect("offset");
        assert_eq!(offset, mysql);

        assert!(parse_timestamp("next tuesday").is_none());
    }

    #[test]
    fn draft_defaults() {
        let meeting = MeetingDraft {
            title: Some("Weekly sync".to_string()),
            ..Default::default()
        }
        .build()
        .expect("complete draft");

        assert_eq!(meeting.platform, DEFAULT_PLATFORM);
        assert!(!meeting.is_locked);
        assert!(meeting.starts_at().is_some());
        assert_eq!(meeting.link_password(), None);
    }

    #[test]
    fn locked_meeting_without_password_is_open() {
        let mut meeting = MeetingDraft {
            title: Some("Private".to_string()),
            is_locked: Some(true),
            ..Default::default()
        }
        .build()
        .expect("complete draft");
        assert_eq!(meeting.link_password(), None);

        meeting.access_password = Some("pw".to_string());
        assert_eq!(meeting.link_password(), Some("pw"));

        meeting.is_locked = false;
        assert_eq!(meeting.link_password(), None);
    }
}
