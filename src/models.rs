use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveTaskRequest {
    pub label: String,
    #[serde(default, deserialize_with = "flag")]
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub day: String,
    pub task: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub view: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub day: String,
    pub task: String,
    pub checked: bool,
    pub percentage: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub checked: usize,
    pub percentage: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskTotal {
    pub task: String,
    pub days_checked: usize,
    pub height: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub overall: u32,
    pub daily: Vec<DailyPoint>,
    pub task_totals: Vec<TaskTotal>,
}

// HTML checkboxes post "on"; JSON clients post a real boolean.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => matches!(text.as_str(), "true" | "on" | "yes" | "1"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_request_accepts_bool_and_text_flags() {
        let json: RemoveTaskRequest =
            serde_json::from_str(r#"{"label":"Read","confirmed":true}"#).unwrap();
        assert!(json.confirmed);

        let text: RemoveTaskRequest =
            serde_json::from_str(r#"{"label":"Read","confirmed":"true"}"#).unwrap();
        assert!(text.confirmed);

        let missing: RemoveTaskRequest = serde_json::from_str(r#"{"label":"Read"}"#).unwrap();
        assert!(!missing.confirmed);
    }
}
