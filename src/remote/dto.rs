use serde::Deserialize;
use serde_json::Value;

/// Course row as the remote API returns it. The API mixes the database's
/// snake_case columns with camelCase keys, so both spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct CourseRecord {
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<Value>,
    #[serde(default, rename = "techStack")]
    pub tech_stack_camel: Option<Value>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, rename = "thumbnailUrl")]
    pub thumbnail_url_camel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MaterialRecord {
    pub id: Value,
    #[serde(default)]
    pub course_id: Option<Value>,
    #[serde(default, rename = "courseId")]
    pub course_id_camel: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default, rename = "contentUrl")]
    pub content_url_camel: Option<String>,
    #[serde(default)]
    pub access_password: Option<String>,
    #[serde(default, rename = "accessPassword")]
    pub access_password_camel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingRecord {
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub meeting_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_locked: Option<Value>,
    #[serde(default, rename = "isLocked")]
    pub is_locked_camel: Option<Value>,
    #[serde(default)]
    pub access_password: Option<String>,
    #[serde(default, rename = "accessPassword")]
    pub access_password_camel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<Value>,
}

impl LoginResponse {
    /// Only a literal `true` counts.
    pub fn is_success(&self) -> bool {
        matches!(self.success, Some(Value::Bool(true)))
    }
}

/// Ids and foreign keys arrive as strings or as bare numbers.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// MySQL booleans come back as 1/0, sometimes quoted.
pub fn loose_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().ok() == Some(1.0),
        _ => false,
    }
}

/// Tech stack column: a JSON-encoded string, a real array, or nothing.
pub fn string_list(value: &Value) -> Result<Vec<String>, serde_json::Error> {
    match value {
        Value::String(encoded) => serde_json::from_str(encoded),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flag_matches_loose_equality_with_one() {
        assert!(loose_flag(&json!(1)));
        assert!(loose_flag(&json!("1")));
        assert!(loose_flag(&json!(true)));
        assert!(!loose_flag(&json!(0)));
        assert!(!loose_flag(&json!("0")));
        assert!(!loose_flag(&json!(null)));
        assert!(!loose_flag(&json!("true")));
    }

    #[test]
    fn numeric_ids_become_strings() {
        assert_eq!(id_string(&json!(17)).as_deref(), Some("17"));
        assert_eq!(id_string(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(id_string(&json!(null)), None);
    }

    #[test]
    fn tech_stack_from_encoded_string() {
        let list = string_list(&json!("[\"React\",\"Node\"]")).expect("valid json");
        assert_eq!(list, vec!["React", "Node"]);
        assert!(string_list(&json!("React, Node")).is_err());
        assert_eq!(string_list(&json!(["Go"])).expect("array"), vec!["Go"]);
    }

    #[test]
    fn login_needs_literal_true() {
        let ok: LoginResponse = serde_json::from_value(json!({"success": true})).expect("decode");
        let truthy: LoginResponse = serde_json::from_value(json!({"success": 1})).expect("decode");
        let missing: LoginResponse =
            serde_json::from_value(json!({"status": "ok"})).expect("decode");
        assert!(ok.is_success());
        assert!(!truthy.is_success());
        assert!(!missing.is_success());
    }
}
