//! HTTP client implementation for MiniMax API.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client as ReqwestClient, Response,
};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    error::{Error, Result},
    types::BaseResp,
};

const USER_AGENT_VALUE: &str = "podgen-minimax-rust/1.0";

/// HTTP client for MiniMax API.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    group_id: Option<String>,
    max_retries: u32,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(
        base_url: String,
        api_key: String,
        group_id: Option<String>,
        max_retries: u32,
    ) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
            group_id,
            max_retries,
        })
    }

    /// Makes an HTTP request to the API with retry support.
    pub async fn request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let backoff = Duration::from_secs(1 << (attempt - 1));
                tokio::time::sleep(backoff).await;
            }

            match self.do_request(method, path, body).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if e.is_retryable() {
                        last_err = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::Other("max retries exceeded".to_string())))
    }

    async fn do_request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.build_url(path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        request = request.headers(self.default_headers()?);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Joins the base URL and path, appending the `GroupId` query
    /// parameter when one is configured.
    pub(crate) fn build_url(&self, path: &str) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(group_id) = &self.group_id {
            let sep = if path.contains('?') { '&' } else { '?' };
            url.push(sep);
            url.push_str("GroupId=");
            url.push_str(group_id);
        }
        url
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| Error::Config(format!("invalid api key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;
        decode_body(&body, status.as_u16())
    }
}

/// Decodes a response body, surfacing both HTTP-level and
/// `base_resp`-level failures as [`Error::Api`].
pub(crate) fn decode_body<R>(body: &[u8], http_status: u16) -> Result<R>
where
    R: DeserializeOwned,
{
    if !(200..300).contains(&http_status) {
        return Err(parse_error(body, http_status));
    }

    if let Ok(api_resp) = serde_json::from_slice::<ApiResponse>(body) {
        if let Some(base_resp) = api_resp.base_resp {
            if base_resp.is_error() {
                return Err(Error::api(
                    base_resp.status_code,
                    base_resp.status_msg,
                    http_status,
                ));
            }
        }
    }

    serde_json::from_slice(body).map_err(Error::from)
}

fn parse_error(body: &[u8], http_status: u16) -> Error {
    if let Ok(api_resp) = serde_json::from_slice::<ApiResponse>(body) {
        if let Some(base_resp) = api_resp.base_resp {
            return Error::api(base_resp.status_code, base_resp.status_msg, http_status);
        }
    }

    Error::api(
        http_status as i32,
        String::from_utf8_lossy(body).to_string(),
        http_status,
    )
}

#[derive(Debug, serde::Deserialize)]
struct ApiResponse {
    base_resp: Option<BaseResp>,
}

/// Decodes hex-encoded audio data.
pub(crate) fn decode_hex_audio(hex_data: &str) -> Result<Vec<u8>> {
    let cleaned: String = hex_data.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&cleaned).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(group_id: Option<&str>) -> HttpClient {
        HttpClient::new(
            "https://api.minimax.io".to_string(),
            "key".to_string(),
            group_id.map(str::to_string),
            0,
        )
        .unwrap()
    }

    #[test]
    fn build_url_appends_group_id() {
        assert_eq!(
            client(None).build_url("/v1/t2a_v2"),
            "https://api.minimax.io/v1/t2a_v2"
        );
        assert_eq!(
            client(Some("42")).build_url("/v1/t2a_v2"),
            "https://api.minimax.io/v1/t2a_v2?GroupId=42"
        );
        assert_eq!(
            client(Some("42")).build_url("/v1/files/retrieve?file_id=7"),
            "https://api.minimax.io/v1/files/retrieve?file_id=7&GroupId=42"
        );
    }

    #[test]
    fn decode_body_surfaces_base_resp_error() {
        let body = br#"{"base_resp":{"status_code":1002,"status_msg":"rate limited"}}"#;
        let err = decode_body::<serde_json::Value>(body, 200).unwrap_err();
        assert!(err.is_rate_limit());
    }

    #[test]
    fn decode_body_keeps_plain_text_errors() {
        let err = decode_body::<serde_json::Value>(b"task not found", 404).unwrap_err();
        match err {
            Error::Api {
                status_msg,
                http_status,
                ..
            } => {
                assert_eq!(status_msg, "task not found");
                assert_eq!(http_status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_body_accepts_success() {
        let body = br#"{"task_id":"t1","base_resp":{"status_code":0,"status_msg":"success"}}"#;
        let v: serde_json::Value = decode_body(body, 200).unwrap();
        assert_eq!(v["task_id"], "t1");
    }

    #[test]
    fn decode_hex_audio_ignores_whitespace() {
        assert_eq!(decode_hex_audio("49 44\n33").unwrap(), b"ID3".to_vec());
        assert!(decode_hex_audio("zz").is_err());
    }
}
