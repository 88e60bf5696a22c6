// Envelope decoder - {data, meta, error} wrapper used by every API response
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
}

impl PageMeta {
    /// True once `page * limit` covers `total`.
    pub fn is_last_page(&self) -> bool {
        u64::from(self.page) * u64::from(self.limit) >= u64::from(self.total)
    }

    fn validate(&self) -> Result<()> {
        if self.page == 0 || self.limit == 0 {
            return Err(Error::decode(format!(
                "invalid pagination metadata: page={} limit={} total={}",
                self.page, self.limit, self.total
            )));
        }
        Ok(())
    }
}

/// Error block the server puts in place of `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Server {
            code: e.code,
            message: e.message,
        }
    }
}

/// A decoded response: payload `P` (one item or a list) plus optional meta.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<P> {
    pub data: Option<P>,
    pub meta: Option<PageMeta>,
}

pub type PageEnvelope<T> = Envelope<Vec<T>>;

impl<P> Envelope<P> {
    /// The payload, or a decode error when the server sent none.
    pub fn into_data(self) -> Result<P> {
        self.data
            .ok_or_else(|| Error::decode("response envelope has no data"))
    }
}

impl<T> PageEnvelope<T> {
    /// Items of a list page; a missing `data` is an empty page.
    pub fn into_items(self) -> (Vec<T>, Option<PageMeta>) {
        (self.data.unwrap_or_default(), self.meta)
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    data: Option<Value>,
    meta: Option<PageMeta>,
    error: Option<ApiError>,
}

/// Decode `bytes` into an envelope with payload `P`.
///
/// An `error` block wins over anything in `data`: the payload is not even
/// looked at, so a half-formed `data` cannot mask the server's error.
pub fn decode<P: DeserializeOwned>(bytes: &[u8]) -> Result<Envelope<P>> {
    let raw: RawEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| Error::decode(format!("invalid envelope JSON: {e}")))?;

    if let Some(error) = raw.error {
        return Err(error.into());
    }

    if let Some(meta) = &raw.meta {
        meta.validate()?;
    }

    let data = match raw.data {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value)
                .map_err(|e| Error::decode(format!("unexpected data shape: {e}")))?,
        ),
    };

    Ok(Envelope {
        data,
        meta: raw.meta,
    })
}

/// Decode a list page.
pub fn decode_page<T: DeserializeOwned>(bytes: &[u8]) -> Result<PageEnvelope<T>> {
    decode(bytes)
}

/// The server error carried by `bytes`, if it is an error envelope.
pub(crate) fn embedded_error(bytes: &[u8]) -> Option<Error> {
    #[derive(Deserialize)]
    struct ErrorOnly {
        error: Option<ApiError>,
    }

    serde_json::from_slice::<ErrorOnly>(bytes)
        .ok()
        .and_then(|e| e.error)
        .map(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_decode_list_with_meta() {
        let body = br#"{"data":[{"id":"C1"},{"id":"C2"}],"meta":{"page":1,"limit":2,"total":2}}"#;
        let (items, meta) = decode_page::<Item>(body).unwrap().into_items();

        assert_eq!(items, vec![Item { id: "C1".into() }, Item { id: "C2".into() }]);
        assert_eq!(meta, Some(PageMeta { page: 1, limit: 2, total: 2 }));
    }

    #[test]
    fn test_decode_single_without_meta() {
        let envelope = decode::<Item>(br#"{"data":{"id":"A"}}"#).unwrap();
        assert!(envelope.meta.is_none());
        assert_eq!(envelope.into_data().unwrap(), Item { id: "A".into() });
    }

    #[test]
    fn test_error_becomes_server_error() {
        let err = decode::<Item>(br#"{"error":{"code":401,"message":"Unauthorized"}}"#).unwrap_err();
        assert!(matches!(err, Error::Server { code: 401, ref message } if message == "Unauthorized"));
    }

    #[test]
    fn test_error_takes_precedence_over_data() {
        let body = br#"{"data":{"unexpected":true},"error":{"code":4000,"message":"Cooldown","data":{"remaining":5}}}"#;
        let err = decode::<Vec<Item>>(body).unwrap_err();
        assert!(matches!(err, Error::Server { code: 4000, .. }));
    }

    #[test]
    fn test_missing_data_on_single_resource() {
        let envelope = decode::<Item>(br#"{}"#).unwrap();
        assert!(matches!(envelope.into_data(), Err(Error::Decode { .. })));

        let envelope = decode::<Item>(br#"{"data":null}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_missing_data_on_page_is_empty() {
        let (items, meta) = decode_page::<Item>(br#"{"meta":{"page":1,"limit":20,"total":0}}"#)
            .unwrap()
            .into_items();
        assert!(items.is_empty());
        assert_eq!(meta.map(|m| m.total), Some(0));
    }

    #[test]
    fn test_malformed_json_and_shape() {
        assert!(matches!(decode::<Item>(b"{\"data\":"), Err(Error::Decode { .. })));
        assert!(matches!(decode::<Item>(b""), Err(Error::Decode { .. })));
        assert!(matches!(decode::<Item>(b"[1,2]"), Err(Error::Decode { .. })));
        assert!(matches!(
            decode_page::<Item>(br#"{"data":{"id":"not-a-list"}}"#),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_zero_limit_meta_is_rejected() {
        let body = br#"{"data":[],"meta":{"page":1,"limit":0,"total":5}}"#;
        assert!(matches!(decode_page::<Item>(body), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_is_last_page() {
        assert!(PageMeta { page: 1, limit: 20, total: 0 }.is_last_page());
        assert!(PageMeta { page: 1, limit: 2, total: 2 }.is_last_page());
        assert!(!PageMeta { page: 1, limit: 1, total: 2 }.is_last_page());
        assert!(PageMeta { page: 3, limit: 20, total: 41 }.is_last_page());
        assert!(PageMeta { page: u32::MAX, limit: u32::MAX, total: u32::MAX }.is_last_page());
    }

    #[test]
    fn test_embedded_error() {
        assert!(embedded_error(br#"{"error":{"code":404,"message":"Not found"}}"#).is_some());
        assert!(embedded_error(b"<html>bad gateway</html>").is_none());
        assert!(embedded_error(br#"{"data":[]}"#).is_none());
    }
}
