pub mod dto;

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::RemoteConfig;
use crate::error::AppError;
use crate::models::{Course, CourseLevel, Material, MaterialKind, Meeting, SiteConfig};

const ERROR_BODY_PREVIEW: usize = 300;

/// Remote operations, selected through the `action` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetCourses,
    SaveCourse,
    DeleteCourse,
    GetMaterials,
    SaveMaterial,
    DeleteMaterial,
    GetMeetings,
    SaveMeeting,
    DeleteMeeting,
    CheckLogin,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetCourses => "getCourses",
            Action::SaveCourse => "saveCourse",
            Action::DeleteCourse => "deleteCourse",
            Action::GetMaterials => "getMaterials",
            Action::SaveMaterial => "saveMaterial",
            Action::DeleteMaterial => "deleteMaterial",
            Action::GetMeetings => "getMeetings",
            Action::SaveMeeting => "saveMeeting",
            Action::DeleteMeeting => "deleteMeeting",
            Action::CheckLogin => "checkLogin",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// What a failed call resolves to: reads get an empty list, writes get
    /// an error marker.
    pub fn fallback(&self) -> Value {
        match self {
            RequestMethod::Get => json!([]),
            RequestMethod::Post => json!({ "status": "error", "message": "Connection failed" }),
        }
    }
}

/// Result of a save/delete call as reported by the remote API.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Completed(Value),
    Failed { message: String },
}

impl MutationOutcome {
    pub fn from_response(response: Value) -> Self {
        let message = || {
            response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request rejected")
                .to_string()
        };

        if response.get("status").and_then(Value::as_str) == Some("error") {
            return MutationOutcome::Failed { message: message() };
        }
        if response.get("success") == Some(&Value::Bool(false)) {
            return MutationOutcome::Failed { message: message() };
        }
        MutationOutcome::Completed(response)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, MutationOutcome::Completed(_))
    }
}

/// Access to the remote course catalog.
///
/// Every method is fail-soft: transport, status and decode failures are
/// logged and turned into empty collections, `false`, or
/// [`MutationOutcome::Failed`]. Nothing here returns an error to the caller.
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn get_courses(&self) -> Vec<Course>;
    async fn save_course(&self, course: &Course) -> MutationOutcome;
    async fn delete_course(&self, id: &str) -> MutationOutcome;

    async fn get_materials(&self) -> Vec<Material>;
    async fn save_material(&self, material: &Material) -> MutationOutcome;
    async fn delete_material(&self, id: &str) -> MutationOutcome;

    async fn get_meetings(&self) -> Vec<Meeting>;
    async fn save_meeting(&self, meeting: &Meeting) -> MutationOutcome;
    async fn delete_meeting(&self, id: &str) -> MutationOutcome;

    async fn verify_login(&self, password: &str) -> bool;

    /// Not served by the remote API yet; always the built-in copy.
    async fn get_site_config(&self) -> SiteConfig {
        SiteConfig::default()
    }
}

pub struct HttpGateway {
    client: Client,
    config: RemoteConfig,
}

impl HttpGateway {
    pub fn new(config: RemoteConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        info!("API endpoint: {}", config.base_url);
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn action_url(&self, action: Action) -> Url {
        let mut url = self.config.base_url.clone();
        url.query_pairs_mut()
            .append_pair("action", action.as_str())
            .append_pair("_t", &Utc::now().timestamp_millis().to_string());
        url
    }

    async fn try_request(
        &self,
        action: Action,
        method: RequestMethod,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let url = self.action_url(action);
        debug!("{:?} {}", method, url);

        let request = match method {
            RequestMethod::Get => self.client.get(url),
            RequestMethod::Post => {
                let request = self.client.post(url);
                match body {
                    Some(body) => request.json(body),
                    None => request,
                }
            }
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Status {
                status,
                body: body_preview(&body),
            });
        }

        let body_text = response.text().await?;
        Ok(serde_json::from_str(&body_text)?)
    }

    /// One round trip to the remote API. Never fails: see
    /// [`RequestMethod::fallback`] for what an unsuccessful call yields.
    pub async fn request(
        &self,
        action: Action,
        method: RequestMethod,
        body: Option<Value>,
    ) -> Value {
        match self.try_request(action, method, body.as_ref()).await {
            Ok(value) => value,
            Err(e) => {
                error!("API error ({}): {}", action, e);
                if e.is_remote() {
                    warn!(
                        "backend at {} is unavailable; check API_BASE_URL \
                         and the server's CORS and database settings",
                        self.config.base_url
                    );
                }
                method.fallback()
            }
        }
    }

    async fn fetch_records(&self, action: Action) -> Vec<Value> {
        match self.request(action, RequestMethod::Get, None).await {
            Value::Array(records) => records,
            other => {
                warn!("{} returned a non-list payload, ignoring: {}", action, other);
                Vec::new()
            }
        }
    }

    async fn mutate<T: Serialize + ?Sized>(&self, action: Action, payload: &T) -> MutationOutcome {
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                error!("failed to encode {} payload: {}", action, e);
                return MutationOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        let response = self.request(action, RequestMethod::Post, Some(body)).await;
        let outcome = MutationOutcome::from_response(response);
        if let MutationOutcome::Failed { message } = &outcome {
            warn!("{} failed: {}", action, message);
        }
        outcome
    }
}

/// Decodes every record, dropping the ones that cannot be read.
fn decode_all<T>(
    action: Action,
    records: Vec<Value>,
    parse: impl Fn(Value) -> Result<T, AppError>,
) -> Vec<T> {
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        match parse(record) {
            Ok(item) => items.push(item),
            Err(e) => warn!("skipping unreadable record from {}: {}", action, e),
        }
    }
    items
}

fn record_id(value: &Value) -> Result<String, AppError> {
    dto::id_string(value)
        .ok_or_else(|| AppError::MalformedRecord(format!("no usable id: {}", value)))
}

/// Error bodies are kept to the first [`ERROR_BODY_PREVIEW`] characters.
fn body_preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW).collect()
}

pub fn parse_course(record: Value) -> Result<Course, AppError> {
    let record: dto::CourseRecord = serde_json::from_value(record)?;
    let id = record_id(&record.id)?;

    let level = match record.level.as_deref() {
        Some(raw) => raw.parse::<CourseLevel>().unwrap_or_else(|e| {
            warn!("course {}: {}, using default", id, e);
            CourseLevel::default()
        }),
        None => CourseLevel::default(),
    };

    let tech_stack = match record.tech_stack.as_ref().or(record.tech_stack_camel.as_ref()) {
        Some(value) => dto::string_list(value).unwrap_or_else(|e| {
            warn!("course {}: unreadable tech stack: {}", id, e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    Ok(Course {
        id,
        title: record.title.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        level,
        tech_stack,
        thumbnail_url: record
            .thumbnail_url
            .or(record.thumbnail_url_camel)
            .unwrap_or_default(),
    })
}

pub fn parse_material(record: Value) -> Result<Material, AppError> {
    let record: dto::MaterialRecord = serde_json::from_value(record)?;
    let id = record_id(&record.id)?;

    let course_id = record
        .course_id
        .as_ref()
        .or(record.course_id_camel.as_ref())
        .and_then(dto::id_string)
        .unwrap_or_default();

    let kind = match record.kind.as_deref() {
        Some(raw) => raw.parse::<MaterialKind>().unwrap_or_else(|e| {
            warn!("material {}: {}, using default", id, e);
            MaterialKind::default()
        }),
        None => MaterialKind::default(),
    };

    Ok(Material {
        id,
        course_id,
        title: record.title.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        kind,
        content_url: record.content_url.or(record.content_url_camel).unwrap_or_default(),
        access_password: record.access_password.or(record.access_password_camel),
    })
}

pub fn parse_meeting(record: Value) -> Result<Meeting, AppError> {
    let record: dto::MeetingRecord = serde_json::from_value(record)?;
    let id = record_id(&record.id)?;

    let is_locked = record
        .is_locked
        .as_ref()
        .or(record.is_locked_camel.as_ref())
        .is_some_and(dto::loose_flag);

    Ok(Meeting {
        id,
        title: record.title.unwrap_or_default(),
        date: record.date.or(record.meeting_date).unwrap_or_default(),
        description: record.description,
        platform: record.platform.unwrap_or_default(),
        link: record.link.unwrap_or_default(),
        is_locked,
        access_password: record.access_password.or(record.access_password_camel),
    })
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn get_courses(&self) -> Vec<Course> {
        let records = self.fetch_records(Action::GetCourses).await;
        decode_all(Action::GetCourses, records, parse_course)
    }

    async fn save_course(&self, course: &Course) -> MutationOutcome {
        self.mutate(Action::SaveCourse, course).await
    }

    async fn delete_course(&self, id: &str) -> MutationOutcome {
        self.mutate(Action::DeleteCourse, &json!({ "id": id })).await
    }

    async fn get_materials(&self) -> Vec<Material> {
        let records = self.fetch_records(Action::GetMaterials).await;
        decode_all(Action::GetMaterials, records, parse_material)
    }

    async fn save_material(&self, material: &Material) -> MutationOutcome {
        self.mutate(Action::SaveMaterial, material).await
    }

    async fn delete_material(&self, id: &str) -> MutationOutcome {
        self.mutate(Action::DeleteMaterial, &json!({ "id": id })).await
    }

    async fn get_meetings(&self) -> Vec<Meeting> {
        let records = self.fetch_records(Action::GetMeetings).await;
        decode_all(Action::GetMeetings, records, parse_meeting)
    }

    async fn save_meeting(&self, meeting: &Meeting) -> MutationOutcome {
        self.mutate(Action::SaveMeeting, meeting).await
    }

    async fn delete_meeting(&self, id: &str) -> MutationOutcome {
        self.mutate(Action::DeleteMeeting, &json!({ "id": id })).await
    }

    async fn verify_login(&self, password: &str) -> bool {
        let response = self
            .request(Action::CheckLogin, RequestMethod::Post, Some(json!({ "password": password })))
            .await;
        serde_json::from_value::<dto::LoginResponse>(response)
            .map(|r| r.is_success())
            .unwrap_or(false)
    }
}

/// Gateway with no backend: empty collections, every write accepted,
/// every login refused.
pub struct NoopGateway;

#[async_trait]
impl DataGateway for NoopGateway {
    async fn get_courses(&self) -> Vec<Course> {
        Vec::new()
    }

    async fn save_course(&self, _course: &Course) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn delete_course(&self, _id: &str) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn get_materials(&self) -> Vec<Material> {
        Vec::new()
    }

    async fn save_material(&self, _material: &Material) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn delete_material(&self, _id: &str) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn get_meetings(&self) -> Vec<Meeting> {
        Vec::new()
    }

    async fn save_meeting(&self, _meeting: &Meeting) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn delete_meeting(&self, _id: &str) -> MutationOutcome {
        MutationOutcome::Completed(Value::Null)
    }

    async fn verify_login(&self, _password: &str) -> bool {
        false
    }
}
