// SpaceTraders API client library
// Authenticated requests, bounded response reads and paginated collection

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use models::{
    agent::Agent,
    contract::{Contract, DeliveryItem},
    responses::*,
    ship::{CargoItem, Ship, ShipCargo, ShipNav},
    waypoint::{Vector2, Waypoint, WaypointType},
};

pub use client::{
    BoundedResponseReader, PagedResource, PaginationDriver, RawResponse, RequestTemplate,
    SpaceTradersClient,
};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use storage::{load_agent_token, SaveData};

// Constants
pub const API_BASE_URL: &str = config::DEFAULT_BASE_URL;
pub const AGENT_TOKEN_FILE: &str = "AGENT_TOKEN";
