// Append-only API call log
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Writes one timestamped block per executed call. Request headers are
/// never written, so the bearer token stays out of the file.
#[derive(Debug, Clone)]
pub struct ApiCallLog {
    path: PathBuf,
}

impl ApiCallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn record(
        &self,
        method: &str,
        url: &str,
        request_body: Option<&str>,
        response_status: u16,
        response_body: Option<&str>,
    ) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== API CALL [{timestamp}] ===\n\
             Method: {method}\n\
             URL: {url}\n\
             Request Body: {request_body}\n\
             Response Status: {response_status}\n\
             Response Body: {response_body}\n\
             ========================================\n",
            request_body = request_body.unwrap_or("None"),
            response_body = response_body.unwrap_or("Not captured"),
        );

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(log_entry.as_bytes()));

        // logging must never fail the call itself
        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "failed to append API call log");
        }
    }
}
