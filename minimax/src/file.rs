//! File service.

use std::sync::Arc;

use serde::Deserialize;

use super::{error::Result, http::HttpClient, types::BaseResp};

/// File service. Only retrieval is needed here: async speech tasks
/// deliver their audio as a stored file.
pub struct FileService {
    http: Arc<HttpClient>,
}

impl FileService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Gets a download URL for a file.
    pub async fn get_download_url(&self, file_id: &str) -> Result<String> {
        let path = format!("/v1/files/retrieve?file_id={}", file_id);

        #[derive(Deserialize)]
        struct Response {
            file: FileWithUrl,
            #[serde(default)]
            #[allow(dead_code)]
            base_resp: Option<BaseResp>,
        }

        #[derive(Deserialize)]
        struct FileWithUrl {
            #[serde(default)]
            download_url: String,
        }

        let resp: Response = self.http.request::<(), _>("GET", &path, None).await?;
        Ok(resp.file.download_url)
    }
}
