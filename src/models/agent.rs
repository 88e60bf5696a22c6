use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Agent {
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
    pub symbol: String,
    pub headquarters: String,
    pub credits: i64,
    #[serde(rename = "startingFaction")]
    pub starting_faction: String,
    #[serde(rename = "shipCount", default)]
    pub ship_count: i32,
}

impl Agent {
    /// System part of the headquarters waypoint, e.g. `X1-UQ22` for `X1-UQ22-A1`.
    pub fn headquarters_system(&self) -> Option<String> {
        super::system_symbol_of(&self.headquarters)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agent {}", self.symbol)?;
        writeln!(f, "\tAccount ID:\t{}", self.account_id.as_deref().unwrap_or("-"))?;
        writeln!(f, "\tCredits:\t{}", self.credits)?;
        writeln!(f, "\tHeadquarters:\t{}", self.headquarters)?;
        writeln!(f, "\tShip Count:\t{}", self.ship_count)?;
        writeln!(f, "\t(Starting) Faction:\t{}", self.starting_faction)
    }
}
