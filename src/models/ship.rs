use serde::{Deserialize, Serialize};

/// A ship as listed by `/my/ships`. Only registration and nav are required;
/// everything else is kept when present so partial payloads still decode.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Ship {
    pub symbol: String,
    pub registration: ShipRegistration,
    pub nav: ShipNav,
    #[serde(default)]
    pub crew: Option<ShipCrew>,
    #[serde(default)]
    pub frame: Option<ShipComponent>,
    #[serde(default)]
    pub reactor: Option<ShipComponent>,
    #[serde(default)]
    pub engine: Option<ShipComponent>,
    #[serde(default)]
    pub cooldown: Option<ShipCooldown>,
    #[serde(default)]
    pub modules: Vec<ShipComponent>,
    #[serde(default)]
    pub mounts: Vec<ShipComponent>,
    #[serde(default)]
    pub cargo: Option<ShipCargo>,
    #[serde(default)]
    pub fuel: Option<ShipFuel>,
}

impl Ship {
    pub fn is_docked(&self) -> bool {
        self.nav.status == "DOCKED"
    }

    pub fn cargo_units(&self) -> i32 {
        self.cargo.as_ref().map_or(0, |c| c.units)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipRegistration {
    pub name: String,
    pub faction_symbol: String,
    pub role: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipNav {
    pub system_symbol: String,
    pub waypoint_symbol: String,
    pub route: ShipRoute,
    pub status: String,
    pub flight_mode: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipRoute {
    pub destination: ShipRouteWaypoint,
    pub origin: ShipRouteWaypoint,
    pub departure_time: String,
    pub arrival: String,
}

/// Endpoint of a route; `x`/`y` locate the ship when it is not in transit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipRouteWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCrew {
    pub current: i32,
    pub required: i32,
    pub capacity: i32,
    #[serde(default)]
    pub rotation: String,
    #[serde(default)]
    pub morale: i32,
    #[serde(default)]
    pub wages: i32,
}

/// Frame, reactor, engine, module or mount. Only the common fields are kept.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipComponent {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub condition: Option<f64>,
    #[serde(default)]
    pub integrity: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipCooldown {
    pub ship_symbol: String,
    pub total_seconds: i32,
    pub remaining_seconds: i32,
    #[serde(default)]
    pub expiration: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCargo {
    pub capacity: i32,
    pub units: i32,
    #[serde(default)]
    pub inventory: Vec<CargoItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CargoItem {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipFuel {
    pub current: i32,
    pub capacity: i32,
}
