// Error types for the SpaceTraders API client
use thiserror::Error;

/// Every failure the client can report.
///
/// `NoContent` is a sentinel rather than a failure: the call succeeded but the
/// server reported zero items. Use [`Error::is_no_content`] to detect it, since
/// the pagination driver may have wrapped it in page context.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("Response body exceeded {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("spacetraders.io error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("No content from server for {resource}")]
    NoContent { resource: String },

    #[error("{resource} page {page}: {source}")]
    Page {
        resource: String,
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("{resource}: {source}")]
    Resource {
        resource: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap this error with the page and resource it happened on.
    pub fn on_page(self, resource: impl Into<String>, page: u32) -> Self {
        Self::Page {
            resource: resource.into(),
            page,
            source: Box::new(self),
        }
    }

    /// Wrap this error with the single resource it happened on.
    pub fn on_resource(self, resource: impl Into<String>) -> Self {
        Self::Resource {
            resource: resource.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any page or resource context stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::Page { source, .. } | Error::Resource { source, .. } => source.root(),
            other => other,
        }
    }

    /// Page number the error was annotated with, innermost first.
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::Page { source, page, .. } => source.page().or(Some(*page)),
            Error::Resource { source, .. } => source.page(),
            _ => None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self.root(), Error::NoContent { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.root(), Error::Server { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
