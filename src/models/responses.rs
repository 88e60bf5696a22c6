use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /register`
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub symbol: &'a str,
    pub faction: &'a str,
}

/// `data` of the registration response: the new agent and its access token.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Registration {
    pub token: String,
    pub agent: crate::models::Agent,
    #[serde(default)]
    pub contract: Option<crate::models::Contract>,
    #[serde(default)]
    pub faction: Option<Value>,
    #[serde(default)]
    pub ship: Option<Value>,
}
