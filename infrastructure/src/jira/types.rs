//! Jira REST v2 wire types

use pointing_application::TrackerIssue;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `GET /rest/api/2/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<SearchIssue>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl SearchIssue {
    /// Project onto the tracker port type using the configured custom fields
    pub(crate) fn into_tracker_issue(
        self,
        story_points_field: &str,
        acceptance_criteria_field: &str,
    ) -> TrackerIssue {
        TrackerIssue {
            title: text_field(&self.fields, "summary").unwrap_or_default(),
            description: text_field(&self.fields, "description"),
            acceptance_criteria: text_field(&self.fields, acceptance_criteria_field),
            story_points: self.fields.get(story_points_field).and_then(Value::as_f64),
            key: self.key,
        }
    }
}

/// Non-blank string value of a field; null and non-string values are absent
fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Body of `PUT /rest/api/2/issue/{key}` setting one numeric field
pub(crate) fn numeric_field_update(field: &str, value: u64) -> Value {
    let mut fields = Map::new();
    fields.insert(field.to_string(), Value::from(value));
    let mut body = Map::new();
    body.insert("fields".to_string(), Value::Object(fields));
    Value::Object(body)
}
