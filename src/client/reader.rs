// Bounded response reader - executes a request and buffers its body under a ceiling
use crate::client::api_log::ApiCallLog;
use crate::client::envelope::embedded_error;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Request};
use tracing::debug;

/// Ceiling applied to paginated list responses.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// How much of a non-2xx body is kept in [`Error::HttpStatus`].
const ERROR_BODY_PREVIEW: usize = 512;

/// Most that is read from a non-2xx body. Large enough for any error envelope.
const ERROR_BODY_CAP: usize = 8 * 1024;

/// Status code plus the fully buffered body of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that yields a response body one chunk at a time.
#[async_trait]
pub trait ChunkSource: Send {
    /// Next chunk, or `None` once the stream has ended.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}

#[async_trait]
impl ChunkSource for reqwest::Response {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.chunk().await?)
    }
}

/// Read `source` until end-of-stream, failing once more than `max_bytes`
/// have been accumulated.
///
/// Trailing zero bytes are stripped from each chunk before it is appended.
pub async fn read_bounded<S>(source: &mut S, max_bytes: usize) -> Result<Vec<u8>>
where
    S: ChunkSource + ?Sized,
{
    let mut body = Vec::new();

    while let Some(chunk) = source.next_chunk().await? {
        let data = trim_zero_padding(&chunk);
        if body.len() + data.len() > max_bytes {
            return Err(Error::ResponseTooLarge { limit: max_bytes });
        }
        body.extend_from_slice(data);
    }

    Ok(body)
}

/// Read `source` until end-of-stream or until `cap` bytes are held, whichever
/// comes first. Anything past `cap` is left unread.
pub async fn read_capped<S>(source: &mut S, cap: usize) -> Result<Vec<u8>>
where
    S: ChunkSource + ?Sized,
{
    let mut body = Vec::new();

    while body.len() < cap {
        let Some(chunk) = source.next_chunk().await? else {
            break;
        };
        let data = trim_zero_padding(&chunk);
        let take = data.len().min(cap - body.len());
        body.extend_from_slice(&data[..take]);
    }

    Ok(body)
}

fn trim_zero_padding(chunk: &[u8]) -> &[u8] {
    let end = chunk
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    &chunk[..end]
}

/// Executes requests and buffers their bodies, enforcing a byte ceiling.
///
/// The response stream is owned by `execute` and dropped on every return
/// path, so the connection goes back to the pool or is closed even when the
/// body is rejected.
#[derive(Debug, Clone)]
pub struct BoundedResponseReader {
    client: Client,
    max_bytes: usize,
    api_log: Option<ApiCallLog>,
}

impl BoundedResponseReader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            api_log: None,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_api_log(mut self, api_log: Option<ApiCallLog>) -> Self {
        self.api_log = api_log;
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn execute(&self, request: Request) -> Result<RawResponse> {
        self.execute_with_limit(request, self.max_bytes).await
    }

    /// Execute with a ceiling other than the reader's default, for endpoints
    /// known to return small bodies.
    pub async fn execute_with_limit(&self, request: Request, max_bytes: usize) -> Result<RawResponse> {
        let method = request.method().clone();
        let url = request.url().clone();
        let request_body = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(|b| String::from_utf8_lossy(b).into_owned());

        debug!(%method, %url, max_bytes, "sending request");
        let mut response = self.client.execute(request).await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            // oversized error pages are truncated, never ResponseTooLarge
            let body = read_capped(&mut response, max_bytes.min(ERROR_BODY_CAP)).await;
            drop(response);
            let text = body.as_ref().ok().map(|b| String::from_utf8_lossy(b));
            self.log_call(&method, &url, request_body.as_deref(), status, text.as_deref());

            let body = body?;
            if let Some(server_error) = embedded_error(&body) {
                return Err(server_error);
            }
            return Err(Error::HttpStatus {
                code: status,
                body: preview(&String::from_utf8_lossy(&body)),
            });
        }

        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                self.log_call(&method, &url, request_body.as_deref(), status, None);
                return Err(Error::ResponseTooLarge { limit: max_bytes });
            }
        }

        let body = match read_bounded(&mut response, max_bytes).await {
            Ok(body) => body,
            Err(e) => {
                self.log_call(&method, &url, request_body.as_deref(), status, None);
                return Err(e);
            }
        };
        drop(response);

        let raw = RawResponse { status, body };
        self.log_call(&method, &url, request_body.as_deref(), status, Some(&raw.text()));
        debug!(%url, status, bytes = raw.body.len(), "response buffered");

        Ok(raw)
    }

    fn log_call(
        &self,
        method: &reqwest::Method,
        url: &reqwest::Url,
        request_body: Option<&str>,
        status: u16,
        response_body: Option<&str>,
    ) {
        if let Some(log) = &self.api_log {
            log.record(method.as_str(), url.as_str(), request_body, status, response_body);
        }
    }
}

fn preview(text: &str) -> String {
    if text.len() <= ERROR_BODY_PREVIEW {
        return text.to_string();
    }
    let mut end = ERROR_BODY_PREVIEW;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
