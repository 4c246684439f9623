use axum::{extract::rejection::JsonRejection, extract::State, Json};
use futures::future::join_all;
use podgen::LongformSpeech;
use podgen_minimax::TaskStatus;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    #[serde(default)]
    pub task_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_id: String,
    /// Upstream status name, or `error` when the status call failed.
    pub status: String,
    pub audio_url: Option<String>,
    pub error_message: Option<String>,
    pub success: bool,
    #[serde(skip)]
    state: Option<TaskStatus>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub processing: usize,
}

impl StatusSummary {
    pub fn of(results: &[TaskResult]) -> Self {
        let mut summary = StatusSummary {
            total: results.len(),
            ..Default::default()
        };
        for r in results {
            match r.state {
                Some(s) if s.is_success() && r.audio_url.is_some() => summary.completed += 1,
                Some(s) if s.is_failed() => summary.failed += 1,
                Some(s) if s.is_pending() => summary.processing += 1,
                Some(_) => {}
                None => summary.failed += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub results: Vec<TaskResult>,
    pub summary: StatusSummary,
}

/// `POST /check-audio-status`: one concurrent status call per task.
pub async fn check_audio_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(req) = payload?;
    let task_ids = req
        .task_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ApiError::bad_request("请提供有效的任务ID数组"))?;
    let tts = state.tts()?;
    info!(tasks = task_ids.len(), "checking audio tasks");

    let results = join_all(
        task_ids
            .into_iter()
            .map(|id| check_task(tts.longform.as_ref(), id)),
    )
    .await;
    let summary = StatusSummary::of(&results);

    Ok(Json(StatusResponse {
        success: true,
        results,
        summary,
    }))
}

async fn check_task(speech: &dyn LongformSpeech, task_id: String) -> TaskResult {
    match speech.status(&task_id).await {
        Ok(report) => TaskResult {
            status: report.status.as_str().to_string(),
            audio_url: report.audio_url,
            error_message: report.error_message,
            success: true,
            state: Some(report.status),
            task_id,
        },
        Err(e) => {
            warn!(task_id = %task_id, error = %e, "task status failed");
            TaskResult {
                task_id,
                status: "error".to_string(),
                audio_url: None,
                error_message: Some(e.to_string()),
                success: false,
                state: None,
            }
        }
    }
}
