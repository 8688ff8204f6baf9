use crate::error::CliError;
use crate::project_file::ProjectId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const EXPORT_MUTATION: &str = r#"mutation ($projectId: String!) {
  exportData(input: {projectId: $projectId, clientMutationId: "export"}) {
    url
  }
}"#;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<V: Serialize> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportVariables {
    pub project_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataResponse {
    pub export_data: Option<ExportPayload>,
}

/// What the backend returns for a successful export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    /// Download location of the exported project data
    pub url: String,
}

pub struct SystemClient {
    http_client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl SystemClient {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self, CliError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CliError::BackendRequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Ask the backend to export a project's data. Single attempt, no retry.
    pub async fn export_data(&self, project_id: &ProjectId) -> Result<ExportPayload, CliError> {
        info!("Requesting export of project {}", project_id);
        debug!("POST {}", self.endpoint);

        let body = GraphQlRequest {
            query: EXPORT_MUTATION,
            variables: ExportVariables {
                project_id: project_id.to_string(),
            },
        };

        let mut request = self.http_client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!("Export request failed: {}", e);
            CliError::BackendRequestFailed(format!("HTTP request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Export request returned HTTP {}", status);
            return Err(CliError::BackendRequestFailed(format!(
                "HTTP {} error: {}",
                status, error_text
            )));
        }

        let envelope: GraphQlResponse<ExportDataResponse> = response
            .json()
            .await
            .map_err(|e| CliError::BackendRequestFailed(format!("Failed to parse response: {}", e)))?;

        let payload = extract_payload(envelope)?;
        info!("Export of project {} available at {}", project_id, payload.url);
        Ok(payload)
    }
}

fn extract_payload(
    envelope: GraphQlResponse<ExportDataResponse>,
) -> Result<ExportPayload, CliError> {
    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(CliError::BackendRequestFailed(messages.join("; ")));
    }

    envelope
        .data
        .and_then(|data| data.export_data)
        .ok_or_else(|| {
            CliError::BackendRequestFailed("Response did not contain export data".to_string())
        })
}
