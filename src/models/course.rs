use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{generate_id, non_empty};

pub const DEFAULT_THUMBNAIL_URL: &str = "https://picsum.photos/800/600";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            other => Err(format!("unknown course level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub tech_stack: Vec<String>,
    pub thumbnail_url: String,
}

/// Tech stack as typed into the editor: either already split or a
/// comma-separated line.
#[derive(Debug, Clone, PartialEq)]
pub enum TechStackInput {
    List(Vec<String>),
    Text(String),
}

impl TechStackInput {
    pub fn into_list(self) -> Vec<String> {
        match self {
            TechStackInput::List(items) => items,
            TechStackInput::Text(line) => line
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Course editor state before it is saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<CourseLevel>,
    pub tech_stack: Option<TechStackInput>,
    pub thumbnail_url: Option<String>,
}

impl CourseDraft {
    pub fn is_ready(&self) -> bool {
        non_empty(self.title.as_deref()).is_some()
    }

    /// Returns `None` until the draft has a title.
    pub fn build(&self) -> Option<Course> {
        let title = non_empty(self.title.as_deref())?;

        Some(Course {
            id: non_empty(self.id.as_deref())
                .map(str::to_string)
                .unwrap_or_else(generate_id),
            title: title.to_string(),
            description: self.description.clone().unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            tech_stack: self
                .tech_stack
                .clone()
                .map(TechStackInput::into_list)
                .unwrap_or_default(),
            thumbnail_url: non_empty(self.thumbnail_url.as_deref())
                .unwrap_or(DEFAULT_THUMBNAIL_URL)
                .to_string(),
        })
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        Self {
            id: Some(course.id.clone()),
            title: Some(course.title.clone()),
            description: Some(course.description.clone()),
            level: Some(course.level),
            tech_stack: Some(TechStackInput::List(course.tech_stack.clone())),
            thumbnail_url: Some(course.thumbnail_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_without_title_cannot_be_saved() {
        let draft = CourseDraft {
            description: Some("no title yet".to_string()),
            ..Default::default()
        };
        assert!(!draft.is_ready());
        assert!(draft.build().is_none());
    }

    #[test]
    fn draft_fills_defaults() {
        let draft = CourseDraft {
            title: Some("Rust 101".to_string()),
            tech_stack: Some(TechStackInput::Text("Rust, Tokio , ,Axum".to_string())),
            thumbnail_url: Some(String::new()),
            ..Default::default()
        };

        let course = draft.build().expect("draft has a title");
        assert!(!course.id.is_empty());
        assert!(course.id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(course.level, CourseLevel::Beginner);
        assert_eq!(course.tech_stack, vec!["Rust", "Tokio", "Axum"]);
        assert_eq!(course.thumbnail_url, DEFAULT_THUMBNAIL_URL);
        assert_eq!(course.description, "");
    }

    #[test]
    fn editing_keeps_existing_id() {
        let course = Course {
            id: "c-1".to_string(),
            title: "Go".to_string(),
            description: "d".to_string(),
            level: CourseLevel::Advanced,
            tech_stack: vec!["Go".to_string()],
            thumbnail_url: "t".to_string(),
        };
        let rebuilt = CourseDraft::from(&course).build().expect("complete draft");
        assert_eq!(rebuilt, course);
    }

    #[test]
    fn serializes_in_store_shape() {
        let course = Course {
            id: "1".to_string(),
            title: "T".to_string(),
            description: String::new(),
            level: CourseLevel::Intermediate,
            tech_stack: vec!["JS".to_string()],
            thumbnail_url: "u".to_string(),
        };
        let value = serde_json::to_value(&course).expect("serialize");
        assert_eq!(value["techStack"], serde_json::json!(["JS"]));
        assert_eq!(value["thumbnailUrl"], "u");
        assert_eq!(value["level"], "Intermediate");
    }

    #[test]
    fn level_parse_is_case_insensitive() {
        assert_eq!("advanced".parse::<CourseLevel>(), Ok(CourseLevel::Advanced));
        assert!("expert".parse::<CourseLevel>().is_err());
    }
}
