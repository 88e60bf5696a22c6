// Pagination driver - one generic page loop for every list endpoint
use crate::client::envelope::{decode_page, PageMeta};
use crate::client::reader::BoundedResponseReader;
use crate::client::request::{set_query_param, RequestTemplate};
use crate::config::{validate_page_size, MAX_PAGE_LIMIT};
use crate::error::{Error, Result};
use crate::models::WaypointType;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_LIMIT;

/// List endpoints the driver knows how to walk, each with its path and fixed
/// query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum PagedResource {
    Contracts,
    Ships,
    Waypoints {
        system_symbol: String,
        traits: Vec<String>,
        waypoint_type: Option<WaypointType>,
    },
    Custom {
        name: String,
        path: String,
        params: Vec<(String, String)>,
    },
}

impl PagedResource {
    pub fn waypoints(system_symbol: impl Into<String>) -> Self {
        PagedResource::Waypoints {
            system_symbol: system_symbol.into(),
            traits: Vec::new(),
            waypoint_type: None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            PagedResource::Contracts => "contracts".to_string(),
            PagedResource::Ships => "ships".to_string(),
            PagedResource::Waypoints { system_symbol, .. } => format!("waypoints in {system_symbol}"),
            PagedResource::Custom { name, .. } => name.clone(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            PagedResource::Contracts => "/my/contracts".to_string(),
            PagedResource::Ships => "/my/ships".to_string(),
            PagedResource::Waypoints { system_symbol, .. } => {
                format!("/systems/{system_symbol}/waypoints")
            }
            PagedResource::Custom { path, .. } => path.clone(),
        }
    }

    pub fn fixed_params(&self) -> Vec<(String, String)> {
        match self {
            PagedResource::Contracts | PagedResource::Ships => Vec::new(),
            PagedResource::Waypoints {
                traits,
                waypoint_type,
                ..
            } => {
                let mut params: Vec<(String, String)> = traits
                    .iter()
                    .map(|t| ("traits".to_string(), t.clone()))
                    .collect();
                if let Some(waypoint_type) = waypoint_type {
                    params.push(("type".to_string(), waypoint_type.as_str().to_string()));
                }
                params
            }
            PagedResource::Custom { params, .. } => params.clone(),
        }
    }
}

/// Per-call loop state. Created fresh by every `fetch_all`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationCursor {
    pub current_page: u32,
    pub limit: u32,
    pub total_seen: usize,
    pub pages_fetched: u32,
}

impl PaginationCursor {
    pub fn new(limit: u32) -> Self {
        Self {
            current_page: 1,
            limit,
            total_seen: 0,
            pages_fetched: 0,
        }
    }

    /// Fixed params with `limit` and `page` set, replacing any earlier values.
    pub fn query(&self, fixed: &[(String, String)]) -> Vec<(String, String)> {
        let mut query = fixed.to_vec();
        set_query_param(&mut query, "limit", self.limit.to_string());
        set_query_param(&mut query, "page", self.current_page.to_string());
        query
    }

    /// Record a decoded page and decide whether another one is needed.
    ///
    /// Fails when the server answered with a different page than the one
    /// requested, since the loop could otherwise never reach `total`.
    pub fn advance(&mut self, items_on_page: usize, meta: Option<&PageMeta>) -> Result<bool> {
        if let Some(meta) = meta {
            if meta.page != self.current_page {
                return Err(Error::decode(format!(
                    "requested page {} but server returned page {}",
                    self.current_page, meta.page
                )));
            }
        }

        self.pages_fetched += 1;
        self.total_seen += items_on_page;

        let Some(meta) = meta else {
            // unpaginated endpoint: one page is all there is
            return Ok(false);
        };
        if meta.is_last_page() {
            return Ok(false);
        }

        self.current_page += 1;
        Ok(true)
    }
}

/// Walks a list endpoint page by page and concatenates the items.
///
/// Holds only shared references, so any number of drivers can run
/// concurrently against one template.
#[derive(Debug, Clone, Copy)]
pub struct PaginationDriver<'a> {
    template: &'a RequestTemplate,
    reader: &'a BoundedResponseReader,
    page_size: u32,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(template: &'a RequestTemplate, reader: &'a BoundedResponseReader) -> Self {
        Self {
            template,
            reader,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub async fn fetch_resource<T: DeserializeOwned>(&self, resource: &PagedResource) -> Result<Vec<T>> {
        self.fetch_named(&resource.name(), &resource.path(), &resource.fixed_params())
            .await
    }

    /// Every item of the list at `path`.
    ///
    /// Fails with [`Error::NoContent`] when all pages together held no items.
    /// Any other failure is wrapped with the page it happened on.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        fixed_params: &[(String, String)],
    ) -> Result<Vec<T>> {
        self.fetch_named(path, path, fixed_params).await
    }

    async fn fetch_named<T: DeserializeOwned>(
        &self,
        resource: &str,
        path: &str,
        fixed_params: &[(String, String)],
    ) -> Result<Vec<T>> {
        validate_page_size(self.page_size)?;

        let mut cursor = PaginationCursor::new(self.page_size);
        let mut items: Vec<T> = Vec::new();

        loop {
            let page = cursor.current_page;
            let (page_items, meta) = self
                .fetch_page::<T>(path, &cursor.query(fixed_params))
                .await
                .map_err(|e| e.on_page(resource, page))?;

            debug!(
                resource,
                page,
                items = page_items.len(),
                total = meta.map(|m| m.total),
                "page decoded"
            );

            let more = cursor
                .advance(page_items.len(), meta.as_ref())
                .map_err(|e| e.on_page(resource, page))?;
            items.extend(page_items);
            if !more {
                break;
            }
        }

        if items.is_empty() {
            debug!(resource, pages = cursor.pages_fetched, "no content");
            return Err(Error::NoContent {
                resource: resource.to_string(),
            });
        }

        info!(
            resource,
            pages = cursor.pages_fetched,
            items = cursor.total_seen,
            "pagination complete"
        );
        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<(Vec<T>, Option<PageMeta>)> {
        let request = self.template.derive(path, query)?;
        let raw = self.reader.execute(request).await?;
        Ok(decode_page::<T>(&raw.body)?.into_items())
    }
}
