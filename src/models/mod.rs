pub mod course;
pub mod material;
pub mod meeting;
pub mod site_config;

pub use course::{Course, CourseDraft, CourseLevel, TechStackInput};
pub use material::{Material, MaterialDraft, MaterialKind};
pub use meeting::{Meeting, MeetingDraft, parse_timestamp};
pub use site_config::SiteConfig;

use chrono::Utc;

/// Client-side id for records saved without one: current Unix time in ms.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// `Some` only when the value carries text.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
