//! Client for the Telegram Bot API, used purely as blob storage.
//!
//! Uploading returns an opaque `file_id` which is persisted as metadata;
//! downloading resolves that handle into a short-lived direct URL via
//! `getFile` and streams its body.

use log::debug;
use serde::Deserialize;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The API answered with `ok: false` and a description.
    #[error("Telegram API error: {0}")]
    Api(String),

    /// The API claimed success but the payload was missing its result.
    #[error("Malformed Telegram API response")]
    MalformedResponse,

    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Envelope every Bot API method responds with: either `ok: true` plus a
/// `result`, or `ok: false` plus a human-readable `description`.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, RelayError> {
        if !self.ok {
            return Err(RelayError::Api(
                self.description
                    .unwrap_or_else(|| "no description provided".to_string()),
            ));
        }
        self.result.ok_or(RelayError::MalformedResponse)
    }
}

/// `sendDocument` result: the posted message, of which only the stored
/// document handle matters here.
#[derive(Debug, Deserialize)]
struct SentMessage {
    document: StoredDocument,
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    file_id: String,
}

/// `getFile` result: a relative path valid for about an hour.
#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: String,
}

/// A client bound to one bot token and one storage channel.
#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    bot_token: String,
    channel_id: String,
    api_base: String,
}

impl RelayClient {
    pub fn new(bot_token: String, channel_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            bot_token,
            channel_id,
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Overrides the API host, for tests.
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_base, self.bot_token, file_path)
    }

    /// Uploads raw file bytes to the storage channel, returning the opaque
    /// file handle to persist.
    pub async fn send_document(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<String, RelayError> {
        debug!("relaying {} ({} bytes)", file_name, data.len());

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_owned())
            .mime_str(mime_type)?;
        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.channel_id.clone())
            .part("document", part);

        let response: ApiResponse<SentMessage> = self
            .http
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        Ok(response.into_result()?.document.file_id)
    }

    /// Resolves a stored file handle and opens a streaming download.
    ///
    /// Returns the relative file path (its extension is the only reliable
    /// source for the original file's extension) together with the live
    /// response whose body is the file content.
    pub async fn fetch_document(
        &self,
        file_id: &str,
    ) -> Result<(String, reqwest::Response), RelayError> {
        let response: ApiResponse<FileInfo> = self
            .http
            .get(self.method_url("getFile"))
            .query(&[("file_id", file_id)])
            .send()
            .await?
            .json()
            .await?;

        let file_path = response.into_result()?.file_path;
        debug!("resolved file handle to {file_path}");

        let download = self.http.get(self.file_url(&file_path)).send().await?;
        Ok((file_path, download))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> RelayClient {
        RelayClient::new("123:abc".to_string(), "-1001234".to_string())
    }

    #[test]
    fn test_method_and_file_urls() {
        let client = make_client();
        assert_eq!(
            client.method_url("sendDocument"),
            "https://api.telegram.org/bot123:abc/sendDocument"
        );
        assert_eq!(
            client.file_url("documents/file_42.pdf"),
            "https://api.telegram.org/file/bot123:abc/documents/file_42.pdf"
        );

        let client = make_client().with_api_base("http://localhost:8081".to_string());
        assert_eq!(client.method_url("getFile"), "http://localhost:8081/bot123:abc/getFile");
    }

    #[test]
    fn test_send_document_response_deserializes() {
        let body = r#"{
            "ok": true,
            "result": {
                "message_id": 7,
                "document": { "file_id": "BQACAgUAAx0", "file_unique_id": "AgADxw" }
            }
        }"#;

        let response: ApiResponse<SentMessage> = serde_json::from_str(body).unwrap();
        let message = response.into_result().unwrap();
        assert_eq!(message.document.file_id, "BQACAgUAAx0");
    }

    #[test]
    fn test_get_file_response_deserializes() {
        let body = r#"{
            "ok": true,
            "result": { "file_id": "BQACAgUAAx0", "file_size": 12345, "file_path": "documents/file_42.pdf" }
        }"#;

        let response: ApiResponse<FileInfo> = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_result().unwrap().file_path, "documents/file_42.pdf");
    }

    #[test]
    fn test_error_response_surfaces_description() {
        let body = r#"{ "ok": false, "error_code": 400, "description": "Bad Request: chat not found" }"#;

        let response: ApiResponse<SentMessage> = serde_json::from_str(body).unwrap();
        match response.into_result() {
            Err(RelayError::Api(description)) => {
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_result_is_malformed() {
        let body = r#"{ "ok": true }"#;

        let response: ApiResponse<FileInfo> = serde_json::from_str(body).unwrap();
        assert!(matches!(response.into_result(), Err(RelayError::MalformedResponse)));
    }
}
