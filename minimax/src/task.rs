//! Async speech task management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    error::Result,
    http::HttpClient,
    types::{AudioInfo, BaseResp, FlexibleId, TaskStatus},
};

/// An async speech task that can be polled for completion.
pub struct Task {
    id: String,
    http: Arc<HttpClient>,
}

impl Task {
    /// Creates a handle for an existing task id.
    pub fn new(id: String, http: Arc<HttpClient>) -> Self {
        Self { id, http }
    }

    /// Returns the task ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Queries the current status of the task.
    pub async fn status(&self) -> Result<TaskStatusResponse> {
        #[derive(Serialize)]
        struct Request<'a> {
            task_id: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            status: TaskStatus,
            #[serde(default)]
            file_id: Option<FlexibleId>,
            extra_info: Option<AudioInfo>,
            #[serde(default)]
            error_message: Option<String>,
            #[serde(default)]
            #[allow(dead_code)]
            base_resp: Option<BaseResp>,
        }

        let resp: Response = self
            .http
            .request(
                "POST",
                "/v1/t2a_async/fetch",
                Some(&Request { task_id: &self.id }),
            )
            .await?;

        Ok(TaskStatusResponse {
            task_id: self.id.clone(),
            status: resp.status,
            file_id: resp.file_id.filter(|id| !id.is_empty()).map(|id| id.0),
            audio_info: resp.extra_info,
            error_message: resp.error_message.filter(|m| !m.is_empty()),
        })
    }
}

/// Response from querying task status.
#[derive(Debug, Clone)]
pub struct TaskStatusResponse {
    pub task_id: String,

    pub status: TaskStatus,

    /// Generated audio file id (set once the task succeeds).
    pub file_id: Option<String>,

    pub audio_info: Option<AudioInfo>,

    /// Error message (if failed).
    pub error_message: Option<String>,
}
