// Client module - SpaceTraders API client
pub mod api;
pub mod api_log;
pub mod envelope;
pub mod paginator;
pub mod reader;
pub mod request;

pub use api::SpaceTradersClient;
pub use api_log::ApiCallLog;
pub use envelope::{decode, decode_page, ApiError, Envelope, PageEnvelope, PageMeta};
pub use paginator::{PagedResource, PaginationCursor, PaginationDriver, DEFAULT_PAGE_SIZE};
pub use reader::{read_bounded, BoundedResponseReader, ChunkSource, RawResponse, DEFAULT_MAX_RESPONSE_BYTES};
pub use request::RequestTemplate;
