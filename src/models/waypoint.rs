use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Waypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    #[serde(rename = "systemSymbol")]
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub orbitals: Vec<Orbital>,
    #[serde(default)]
    pub orbits: Option<String>,
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub modifiers: Vec<Trait>,
    #[serde(default)]
    pub chart: Option<Chart>,
    #[serde(default)]
    pub faction: Option<WaypointFaction>,
    #[serde(rename = "isUnderConstruction", default)]
    pub is_under_construction: bool,
}

impl Waypoint {
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn has_trait(&self, symbol: &str) -> bool {
        self.traits.iter().any(|t| t.symbol == symbol)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Orbital {
    pub symbol: String,
}

/// Waypoint trait or modifier
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Trait {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Chart {
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: Option<String>,
    #[serde(rename = "submittedBy")]
    pub submitted_by: Option<String>,
    #[serde(rename = "submittedOn")]
    pub submitted_on: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WaypointFaction {
    pub symbol: String,
}

/// Values accepted by the `type` filter of the waypoints endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaypointType {
    Planet,
    GasGiant,
    Moon,
    OrbitalStation,
    JumpGate,
    AsteroidField,
    Asteroid,
    EngineeredAsteroid,
    AsteroidBase,
    Nebula,
    DebrisField,
    GravityWell,
    ArtificialGravityWell,
    FuelStation,
}

impl WaypointType {
    pub const ALL: [WaypointType; 14] = [
        WaypointType::Planet,
        WaypointType::GasGiant,
        WaypointType::Moon,
        WaypointType::OrbitalStation,
        WaypointType::JumpGate,
        WaypointType::AsteroidField,
        WaypointType::Asteroid,
        WaypointType::EngineeredAsteroid,
        WaypointType::AsteroidBase,
        WaypointType::Nebula,
        WaypointType::DebrisField,
        WaypointType::GravityWell,
        WaypointType::ArtificialGravityWell,
        WaypointType::FuelStation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WaypointType::Planet => "PLANET",
            WaypointType::GasGiant => "GAS_GIANT",
            WaypointType::Moon => "MOON",
            WaypointType::OrbitalStation => "ORBITAL_STATION",
            WaypointType::JumpGate => "JUMP_GATE",
            WaypointType::AsteroidField => "ASTEROID_FIELD",
            WaypointType::Asteroid => "ASTEROID",
            WaypointType::EngineeredAsteroid => "ENGINEERED_ASTEROID",
            WaypointType::AsteroidBase => "ASTEROID_BASE",
            WaypointType::Nebula => "NEBULA",
            WaypointType::DebrisField => "DEBRIS_FIELD",
            WaypointType::GravityWell => "GRAVITY_WELL",
            WaypointType::ArtificialGravityWell => "ARTIFICIAL_GRAVITY_WELL",
            WaypointType::FuelStation => "FUEL_STATION",
        }
    }
}

impl fmt::Display for WaypointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WaypointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        WaypointType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown waypoint type: {s}"))
    }
}

/// Integer map coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance(&self, other: Vector2) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}
