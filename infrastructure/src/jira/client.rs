//! Jira implementation of the tracker port

use super::types::{SearchResponse, numeric_field_update};
use crate::config::{DEFAULT_ACCEPTANCE_CRITERIA_FIELD, DEFAULT_STORY_POINTS_FIELD, FileTrackerConfig};
use async_trait::async_trait;
use pointing_application::{TrackerClient, TrackerError, TrackerIssue};
use pointing_domain::{IssueKey, TrackerConnection};
use reqwest::{RequestBuilder, Response, header};
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Tracker client speaking Jira REST API v2 with bearer tokens
pub struct JiraTrackerClient {
    http: reqwest::Client,
    story_points_field: String,
    acceptance_criteria_field: String,
}

impl JiraTrackerClient {
    pub fn new(request_timeout: Duration) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("pointing-quorum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            story_points_field: DEFAULT_STORY_POINTS_FIELD.to_string(),
            acceptance_criteria_field: DEFAULT_ACCEPTANCE_CRITERIA_FIELD.to_string(),
        })
    }

    pub fn from_config(config: &FileTrackerConfig) -> Result<Self, TrackerError> {
        Ok(Self::new(Duration::from_secs(config.request_timeout_seconds))?
            .with_story_points_field(&config.story_points_field)
            .with_acceptance_criteria_field(&config.acceptance_criteria_field))
    }

    pub fn with_story_points_field(mut self, field: impl Into<String>) -> Self {
        self.story_points_field = field.into();
        self
    }

    pub fn with_acceptance_criteria_field(mut self, field: impl Into<String>) -> Self {
        self.acceptance_criteria_field = field.into();
        self
    }

    fn authorized(&self, request: RequestBuilder, connection: &TrackerConnection) -> RequestBuilder {
        request
            .bearer_auth(connection.credential().expose())
            .header(header::ACCEPT, "application/json")
    }

    fn search_fields(&self) -> String {
        format!(
            "summary,description,{},{}",
            self.story_points_field, self.acceptance_criteria_field
        )
    }
}

fn transport(e: reqwest::Error) -> TrackerError {
    TrackerError::Transport(e.to_string())
}

/// Map non-2xx responses to `TrackerError::Status`
async fn require_success(response: Response) -> Result<Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Status {
        status: status.as_u16(),
        body: truncate_body(body.trim()),
    })
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let kept: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{}...", kept)
}

#[async_trait]
impl TrackerClient for JiraTrackerClient {
    async fn search_issues(
        &self,
        connection: &TrackerConnection,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<TrackerIssue>, TrackerError> {
        let url = format!("{}/rest/api/2/search", connection.base_url());
        let max_results = max_results.to_string();
        let fields = self.search_fields();

        let request = self.http.get(&url).query(&[
            ("jql", query),
            ("maxResults", max_results.as_str()),
            ("fields", fields.as_str()),
        ]);
        let response = self
            .authorized(request, connection)
            .send()
            .await
            .map_err(transport)?;
        let response = require_success(response).await?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
        debug!(
            "Search returned {} issues (total {:?})",
            body.issues.len(),
            body.total
        );

        Ok(body
            .issues
            .into_iter()
            .map(|issue| {
                issue.into_tracker_issue(&self.story_points_field, &self.acceptance_criteria_field)
            })
            .collect())
    }

    async fn update_numeric_field(
        &self,
        connection: &TrackerConnection,
        issue_key: &IssueKey,
        value: u64,
    ) -> Result<(), TrackerError> {
        let url = format!("{}/rest/api/2/issue/{}", connection.base_url(), issue_key);
        let body = numeric_field_update(&self.story_points_field, value);

        let request = self.http.put(&url).json(&body);
        let response = self
            .authorized(request, connection)
            .send()
            .await
            .map_err(transport)?;
        require_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("Bad request"), "Bad request");

        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 50);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_search_fields_follow_configuration() {
        let client = JiraTrackerClient::new(Duration::from_secs(5))
            .unwrap()
            .with_story_points_field("customfield_10016");
        assert_eq!(
            client.search_fields(),
            "summary,description,customfield_10016,customfield_12315940"
        );
    }

    /// Answer one request on a local port with a canned HTTP response
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn issue_key() -> IssueKey {
        "PROJ-1".parse().unwrap()
    }

    #[tokio::test]
    async fn test_rejected_update_is_status_error() {
        let base_url = serve_once(
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 37\r\nConnection: close\r\n\r\n{\"errors\":{\"story_points\":\"invalid\"}}",
        )
        .await;
        let client = JiraTrackerClient::new(Duration::from_secs(5)).unwrap();
        let connection = TrackerConnection::new(&base_url, "token").unwrap();

        let result = client.update_numeric_field(&connection, &issue_key(), 5).await;
        match result {
            Err(TrackerError::Status { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("story_points"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_content_update_succeeds() {
        let base_url =
            serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n").await;
        let client = JiraTrackerClient::new(Duration::from_secs(5)).unwrap();
        let connection = TrackerConnection::new(&base_url, "token").unwrap();

        let result = client.update_numeric_field(&connection, &issue_key(), 5).await;
        assert!(result.is_ok(), "unexpected result: {:?}", result);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // bind then release a port so nothing is listening on it
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let client = JiraTrackerClient::new(Duration::from_millis(500)).unwrap();
        let connection = TrackerConnection::new(&format!("http://{}", addr), "token").unwrap();

        let result = client.update_numeric_field(&connection, &issue_key(), 3).await;
        assert!(matches!(result, Err(TrackerError::Transport(_))));
    }
}
