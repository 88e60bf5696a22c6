use crate::client::api_log::ApiCallLog;
use crate::client::envelope::decode;
use crate::client::paginator::{PagedResource, PaginationDriver};
use crate::client::reader::{BoundedResponseReader, RawResponse};
use crate::client::request::{endpoint_url, RequestTemplate};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::*;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// SpaceTraders API client bound to one agent token.
///
/// Cloning is cheap and clones share the connection pool. To switch agents,
/// build a new client with [`SpaceTradersClient::with_token`].
#[derive(Debug, Clone)]
pub struct SpaceTradersClient {
    template: RequestTemplate,
    reader: BoundedResponseReader,
    config: ClientConfig,
}

impl SpaceTradersClient {
    /// Client for the default API root.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), token)
    }

    pub fn with_config(config: ClientConfig, token: &str) -> Result<Self> {
        config.validate()?;
        let template = RequestTemplate::new(&config.api.base_url, token)?;
        let reader = build_reader(&config)?;

        Ok(Self {
            template,
            reader,
            config,
        })
    }

    /// Same configuration and connection pool, different credential.
    pub fn with_token(&self, token: &str) -> Result<Self> {
        Ok(Self {
            template: RequestTemplate::new(&self.config.api.base_url, token)?,
            reader: self.reader.clone(),
            config: self.config.clone(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    pub fn token(&self) -> &str {
        self.template.token()
    }

    pub fn paginator(&self) -> PaginationDriver<'_> {
        PaginationDriver::new(&self.template, &self.reader).with_page_size(self.config.api.page_size)
    }

    // Agent operations
    pub async fn get_agent(&self) -> Result<Agent> {
        self.get_single("/my/agent").await
    }

    // Contract operations
    pub async fn get_contracts(&self) -> Result<Vec<Contract>> {
        self.paginator().fetch_resource(&PagedResource::Contracts).await
    }

    // Ship operations
    pub async fn get_ships(&self) -> Result<Vec<Ship>> {
        self.paginator().fetch_resource(&PagedResource::Ships).await
    }

    pub async fn get_ship(&self, ship_symbol: &str) -> Result<Ship> {
        self.get_single(&format!("/my/ships/{ship_symbol}")).await
    }

    pub async fn get_ship_nav(&self, ship_symbol: &str) -> Result<ShipNav> {
        self.get_single(&format!("/my/ships/{ship_symbol}/nav")).await
    }

    // Waypoint operations
    pub async fn get_system_waypoints(
        &self,
        system_symbol: &str,
        traits: &[String],
        waypoint_type: Option<WaypointType>,
    ) -> Result<Vec<Waypoint>> {
        let resource = PagedResource::Waypoints {
            system_symbol: system_symbol.to_string(),
            traits: traits.to_vec(),
            waypoint_type,
        };
        self.paginator().fetch_resource(&resource).await
    }

    pub async fn get_all_waypoints_in_system(&self, system_symbol: &str) -> Result<Vec<Waypoint>> {
        self.get_system_waypoints(system_symbol, &[], None).await
    }

    pub async fn get_waypoint(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Waypoint> {
        self.get_single(&format!("/systems/{system_symbol}/waypoints/{waypoint_symbol}"))
            .await
    }

    /// Waypoint with all of `traits` closest to where the ship currently is.
    pub async fn find_nearest_waypoint_with_traits(
        &self,
        ship_symbol: &str,
        traits: &[String],
    ) -> Result<Waypoint> {
        let nav = self.get_ship_nav(ship_symbol).await?;
        let here = &nav.route.destination;
        let location = Vector2::new(here.x, here.y);

        let waypoints = self
            .get_system_waypoints(&nav.system_symbol, traits, None)
            .await?;

        let nearest = waypoints
            .into_iter()
            .filter(|w| traits.iter().all(|t| w.has_trait(t)))
            .min_by(|a, b| {
                location
                    .distance(a.position())
                    .total_cmp(&location.distance(b.position()))
            })
            .ok_or_else(|| Error::NoContent {
                resource: format!("waypoints with traits {traits:?} in {}", nav.system_symbol),
            })?;

        debug!(
            ship = ship_symbol,
            waypoint = %nearest.symbol,
            distance = location.distance(nearest.position()),
            "nearest waypoint"
        );
        Ok(nearest)
    }

    /// Raw body of an authenticated GET, without decoding.
    pub async fn get_raw(&self, path: &str) -> Result<RawResponse> {
        let request = self.template.derive_as(Method::GET, path, &[])?;
        self.reader.execute(request).await
    }

    /// Create a new agent. Registration needs no token, so this does not
    /// require a client.
    pub async fn register_agent(config: &ClientConfig, symbol: &str, faction: &str) -> Result<Registration> {
        config.validate()?;
        if symbol.trim().is_empty() || faction.trim().is_empty() {
            return Err(Error::configuration("agent symbol and faction are required"));
        }

        let base = Url::parse(&config.api.base_url)
            .map_err(|e| Error::configuration(format!("invalid base URL: {e}")))?;
        let url = endpoint_url(&base, "/register", &[])?;

        let body = serde_json::to_vec(&RegisterRequest { symbol, faction })?;
        let mut request = Request::new(Method::POST, url);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(body.into());

        let reader = build_reader(config)?;
        let raw = reader
            .execute_with_limit(request, config.limits.registration_bytes)
            .await?;
        let registration: Registration = decode(&raw.body)?.into_data()?;

        info!(agent = %registration.agent.symbol, faction, "registered new agent");
        Ok(registration)
    }

    /// Client for a freshly registered agent.
    pub fn from_registration(config: ClientConfig, registration: &Registration) -> Result<Self> {
        Self::with_config(config, &registration.token)
    }

    async fn get_single<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch_single(path).await.map_err(|e| e.on_resource(path))
    }

    async fn fetch_single<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.template.derive_as(Method::GET, path, &[])?;
        let raw = self
            .reader
            .execute_with_limit(request, self.config.limits.single_resource_bytes)
            .await?;
        decode::<T>(&raw.body)?.into_data()
    }
}

fn build_reader(config: &ClientConfig) -> Result<BoundedResponseReader> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(Error::Transport)?;

    let api_log = config.logging.api_log_path.as_ref().map(ApiCallLog::new);

    Ok(BoundedResponseReader::new(client)
        .with_max_bytes(config.limits.max_response_bytes)
        .with_api_log(api_log))
}
