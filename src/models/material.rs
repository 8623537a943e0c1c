use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{generate_id, non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Video,
    #[default]
    Text,
    File,
}

impl FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(MaterialKind::Video),
            "text" => Ok(MaterialKind::Text),
            "file" => Ok(MaterialKind::File),
            other => Err(format!("unknown material type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
}

impl Material {
    /// Password needed to view the content, if any. Empty counts as none.
    pub fn required_password(&self) -> Option<&str> {
        non_empty(self.access_password.as_deref())
    }

    pub fn is_gated(&self) -> bool {
        self.required_password().is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDraft {
    pub id: Option<String>,
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<MaterialKind>,
    pub content_url: Option<String>,
    pub access_password: Option<String>,
}

impl MaterialDraft {
    pub fn for_course(course_id: impl Into<String>) -> Self {
        Self {
            course_id: Some(course_id.into()),
            ..Default::default()
        }
    }

    pub fn is_ready(&self) -> bool {
        non_empty(self.title.as_deref()).is_some() && non_empty(self.course_id.as_deref()).is_some()
    }

    /// Returns `None` until the draft has a title and an owning course.
    pub fn build(&self) -> Option<Material> {
        let title = non_empty(self.title.as_deref())?;
        let course_id = non_empty(self.course_id.as_deref())?;

        Some(Material {
            id: non_empty(self.id.as_deref())
                .map(str::to_string)
                .unwrap_or_else(generate_id),
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: self.description.clone().unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            content_url: self.content_url.clone().unwrap_or_default(),
            access_password: Some(self.access_password.clone().unwrap_or_default()),
        })
    }
}

impl From<&Material> for MaterialDraft {
    fn from(material: &Material) -> Self {
        Self {
            id: Some(material.id.clone()),
            course_id: Some(material.course_id.clone()),
            title: Some(material.title.clone()),
            description: Some(material.description.clone()),
            kind: Some(material.kind),
            content_url: Some(material.content_url.clone()),
            access_password: material.access_password.clone(),
        }
    }
}
