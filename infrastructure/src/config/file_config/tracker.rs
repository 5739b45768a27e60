//! Tracker configuration from TOML (`[tracker]` section)
//!
//! ```toml
//! [tracker]
//! base_url = "https://issues.example.com"
//! token = "..."                      # or POINTING_TRACKER__TOKEN
//! story_points_field = "customfield_12310243"
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORY_POINTS_FIELD: &str = "customfield_12310243";
pub const DEFAULT_ACCEPTANCE_CRITERIA_FIELD: &str = "customfield_12315940";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTrackerConfig {
    /// Default tracker base URL for `create`
    pub base_url: Option<String>,
    /// Default API token for `create`
    pub token: Option<String>,
    /// Custom field that receives the elected story points
    pub story_points_field: String,
    /// Custom field read as acceptance criteria on import
    pub acceptance_criteria_field: String,
    /// Maximum issues imported by one query
    pub max_results: usize,
    /// Per-request HTTP timeout
    pub request_timeout_seconds: u64,
}

impl Default for FileTrackerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            story_points_field: DEFAULT_STORY_POINTS_FIELD.to_string(),
            acceptance_criteria_field: DEFAULT_ACCEPTANCE_CRITERIA_FIELD.to_string(),
            max_results: 50,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_section_overrides_field_ids() {
        let toml_str = r#"
[tracker]
base_url = "https://issues.example.com"
story_points_field = "customfield_10016"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.tracker.base_url.as_deref(),
            Some("https://issues.example.com")
        );
        assert_eq!(config.tracker.story_points_field, "customfield_10016");
        assert_eq!(
            config.tracker.acceptance_criteria_field,
            DEFAULT_ACCEPTANCE_CRITERIA_FIELD
        );
        assert_eq!(config.tracker.max_results, 50);
    }
}
