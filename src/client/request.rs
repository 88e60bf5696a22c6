// Authenticated request template - one credential, many independent requests
use crate::error::{Error, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request, Url};
use std::fmt;

/// Method, base URL and bearer token shared by every request made with one
/// credential.
///
/// The template is never mutated after construction. [`RequestTemplate::derive`]
/// builds a fresh [`Request`] each time, so the template can be shared
/// read-only between concurrent callers.
#[derive(Clone)]
pub struct RequestTemplate {
    method: Method,
    base_url: Url,
    token: String,
    auth_header: HeaderValue,
}

impl RequestTemplate {
    /// Build a GET template. Fails with a configuration error when either the
    /// base URL or the token is missing.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(Error::configuration("base URL has not been set"));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::configuration("agent token has not been loaded"));
        }

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            Error::configuration(format!("invalid base URL {base_url}: {e}"))
        })?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::configuration("agent token contains invalid header characters"))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            method: Method::GET,
            base_url,
            token: token.to_string(),
            auth_header,
        })
    }

    /// Copy of this template that derives requests with another method.
    pub fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// New request for `path` with the template's method, the bearer header
    /// and an empty body.
    pub fn derive(&self, path: &str, query: &[(String, String)]) -> Result<Request> {
        self.derive_as(self.method.clone(), path, query)
    }

    pub fn derive_as(&self, method: Method, path: &str, query: &[(String, String)]) -> Result<Request> {
        let url = endpoint_url(&self.base_url, path, query)?;
        let mut request = Request::new(method, url);
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.auth_header.clone());
        Ok(request)
    }
}

impl fmt::Debug for RequestTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTemplate")
            .field("method", &self.method)
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Append `path` to `base` and replace the query string with `query`.
///
/// Pairs are appended in order, so repeated keys (e.g. several `traits`)
/// survive. Use [`set_query_param`] beforehand to replace a key.
pub fn endpoint_url(base: &Url, path: &str, query: &[(String, String)]) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|e| Error::configuration(format!("invalid request URL {joined}: {e}")))?;

    url.set_query(None);
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Set `key` to `value`, dropping every existing occurrence first.
pub fn set_query_param(query: &mut Vec<(String, String)>, key: &str, value: impl Into<String>) {
    query.retain(|(k, _)| k != key);
    query.push((key.to_string(), value.into()));
}
