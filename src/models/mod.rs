// Models module - API data structures

pub mod agent;
pub mod contract;
pub mod ship;
pub mod waypoint;
pub mod responses;

pub use agent::*;
pub use contract::*;
pub use ship::*;
pub use waypoint::*;
pub use responses::*;

/// System symbol of a waypoint symbol: the first two dash-separated parts.
pub fn system_symbol_of(waypoint_symbol: &str) -> Option<String> {
    let mut parts = waypoint_symbol.split('-');
    match (parts.next(), parts.next()) {
        (Some(sector), Some(system)) if !sector.is_empty() && !system.is_empty() => {
            Some(format!("{sector}-{system}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_symbol_of() {
        assert_eq!(system_symbol_of("X1-UQ22-A1").as_deref(), Some("X1-UQ22"));
        assert_eq!(system_symbol_of("X1-UQ22").as_deref(), Some("X1-UQ22"));
        assert_eq!(system_symbol_of("X1"), None);
        assert_eq!(system_symbol_of(""), None);
    }

    #[test]
    fn test_vector_distance() {
        let origin = Vector2::new(0, 0);
        assert_eq!(origin.distance(Vector2::new(3, 4)), 5.0);
        assert_eq!(Vector2::new(-3, -4).distance(origin), 5.0);
        assert_eq!(origin.distance(origin), 0.0);
    }

    #[test]
    fn test_waypoint_type_parsing() {
        assert_eq!("asteroid".parse::<WaypointType>(), Ok(WaypointType::Asteroid));
        assert_eq!(
            "ARTIFICIAL_GRAVITY_WELL".parse::<WaypointType>(),
            Ok(WaypointType::ArtificialGravityWell)
        );
        assert!("SPACE_DONUT".parse::<WaypointType>().is_err());
        for t in WaypointType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_agent_display_and_hq_system() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "accountId": "acc-1",
            "symbol": "DODD_TEST",
            "headquarters": "X1-UQ22-A1",
            "credits": 175000,
            "startingFaction": "COSMIC",
            "shipCount": 2
        }))
        .unwrap();

        assert_eq!(agent.headquarters_system().as_deref(), Some("X1-UQ22"));
        let printed = agent.to_string();
        assert!(printed.starts_with("Agent DODD_TEST"));
        assert!(printed.contains("Credits:\t175000"));
    }

    #[test]
    fn test_contract_display() {
        let contract: Contract = serde_json::from_value(serde_json::json!({
            "id": "C1",
            "factionSymbol": "COSMIC",
            "type": "PROCUREMENT",
            "terms": {
                "deadline": "2024-11-07T00:00:00Z",
                "payment": {"onAccepted": 1000, "onFulfilled": 9000},
                "deliver": [{
                    "tradeSymbol": "IRON_ORE",
                    "destinationSymbol": "X1-UQ22-H51",
                    "unitsRequired": 50,
                    "unitsFulfilled": 10
                }]
            },
            "accepted": false,
            "fulfilled": false,
            "expiration": "2024-11-01T00:00:00Z",
            "deadlineToAccept": "2024-11-01T00:00:00Z"
        }))
        .unwrap();

        let printed = contract.to_string();
        assert!(printed.contains("\tC1\n"));
        assert!(printed.contains("Up Front\t1000c"));
        assert!(printed.contains("IRON_ORE 10/50"));
        assert!(printed.contains("DeadlineToAccept"));
        assert!(!printed.contains("FULFILLED"));
    }

    #[test]
    fn test_ship_decodes_with_partial_payload() {
        let route_point = serde_json::json!({
            "symbol": "X1-UQ22-A1", "type": "PLANET", "systemSymbol": "X1-UQ22", "x": 2, "y": -7
        });
        let ship: Ship = serde_json::from_value(serde_json::json!({
            "symbol": "DODD_TEST-1",
            "registration": {"name": "DODD_TEST-1", "factionSymbol": "COSMIC", "role": "COMMAND"},
            "nav": {
                "systemSymbol": "X1-UQ22",
                "waypointSymbol": "X1-UQ22-A1",
                "route": {
                    "destination": route_point.clone(),
                    "origin": route_point,
                    "departureTime": "2024-11-01T00:00:00Z",
                    "arrival": "2024-11-01T00:00:00Z"
                },
                "status": "DOCKED",
                "flightMode": "CRUISE"
            },
            "cargo": {"capacity": 40, "units": 12, "inventory": [{"symbol": "IRON_ORE", "units": 12}]}
        }))
        .unwrap();

        assert!(ship.is_docked());
        assert_eq!(ship.cargo_units(), 12);
        assert_eq!(ship.nav.route.destination.y, -7);
        assert!(ship.fuel.is_none());
        assert!(ship.modules.is_empty());
    }
}
