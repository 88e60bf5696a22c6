// SpaceTraders API client - command line entry point

use clap::{Parser, Subcommand};
use spacetraders_api::{
    load_agent_token, ClientConfig, Error, Result, SaveData, SpaceTradersClient, WaypointType,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spacetraders-api")]
#[command(about = "Query the SpaceTraders API as an agent")]
#[command(version)]
struct Cli {
    /// TOML configuration file, created with defaults when missing
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// File holding the agent bearer token
    #[arg(long, global = true)]
    token_file: Option<String>,

    /// Override the API root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Perform an authenticated GET and print the raw response body
    Request {
        /// Resource path relative to the API root, e.g. /my/agent
        #[arg(long = "res")]
        resource: String,
    },

    /// Show the authenticated agent
    Agent,

    /// List every contract
    Contracts,

    /// List every ship
    Ships,

    /// List the waypoints of a system
    Waypoints {
        system: String,

        /// Required waypoint trait, may be repeated
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Waypoint type filter, e.g. ASTEROID
        #[arg(long = "type")]
        waypoint_type: Option<WaypointType>,
    },

    /// Find the waypoint with the given traits closest to a ship
    Nearest {
        ship: String,

        #[arg(long = "trait", required = true)]
        traits: Vec<String>,
    },

    /// Register a new agent and write its save file
    Register { symbol: String, faction: String },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_or_create(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(token_file) = &cli.token_file {
        config.storage.token_file = token_file.clone();
    }
    config.validate()?;
    config.log_summary();
    Ok(config)
}

/// What the server said when a raw request failed, if anything.
fn failure_body(e: &Error) -> Option<String> {
    match e.root() {
        Error::HttpStatus { body, .. } if !body.is_empty() => Some(body.clone()),
        Error::Server { code, message } => {
            Some(serde_json::json!({ "error": { "code": code, "message": message } }).to_string())
        }
        _ => None,
    }
}

fn authenticated_client(config: &ClientConfig) -> Result<SpaceTradersClient> {
    let token = load_agent_token(&config.storage.token_file)?;
    SpaceTradersClient::with_config(config.clone(), &token)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Request { resource } => {
            let client = authenticated_client(&config)?;
            match client.get_raw(&resource).await {
                Ok(raw) => println!("{}", raw.text()),
                Err(e) => {
                    if let Some(body) = failure_body(&e) {
                        eprintln!("{body}");
                    }
                    return Err(e);
                }
            }
        }
        Command::Agent => {
            let client = authenticated_client(&config)?;
            let agent = client.get_agent().await?;
            println!("{agent}");
        }
        Command::Contracts => {
            let client = authenticated_client(&config)?;
            for contract in client.get_contracts().await? {
                println!("{contract}");
            }
        }
        Command::Ships => {
            let client = authenticated_client(&config)?;
            for ship in client.get_ships().await? {
                let state = if ship.is_docked() { "docked" } else { ship.nav.status.as_str() };
                println!(
                    "{:<20} {:<12} {:<10} {:<16} cargo {}",
                    ship.symbol,
                    ship.registration.role,
                    state,
                    ship.nav.waypoint_symbol,
                    ship.cargo_units()
                );
            }
        }
        Command::Waypoints {
            system,
            traits,
            waypoint_type,
        } => {
            let client = authenticated_client(&config)?;
            let waypoints = client
                .get_system_waypoints(&system, &traits, waypoint_type)
                .await?;
            for waypoint in waypoints {
                let trait_list: Vec<&str> = waypoint.traits.iter().map(|t| t.symbol.as_str()).collect();
                println!(
                    "{:<16} {:<20} ({:>4}, {:>4}) {}",
                    waypoint.symbol,
                    waypoint.waypoint_type,
                    waypoint.x,
                    waypoint.y,
                    trait_list.join(",")
                );
            }
        }
        Command::Nearest { ship, traits } => {
            let client = authenticated_client(&config)?;
            let waypoint = client.find_nearest_waypoint_with_traits(&ship, &traits).await?;
            println!("{} ({}, {})", waypoint.symbol, waypoint.x, waypoint.y);
        }
        Command::Register { symbol, faction } => {
            let registration = SpaceTradersClient::register_agent(&config, &symbol, &faction).await?;
            let save = SaveData::from(registration);
            let path = save.save_in(&config.storage.save_dir)?;
            println!("✅ Registered {}", save.agent);
            println!("💾 Saved to {}", path.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => {}
        Err(e) if e.is_no_content() => {
            println!("ℹ️  {e}");
        }
        Err(e) => {
            eprintln!("❌ {e}");
            if let Error::Server { code, .. } = e.root() {
                eprintln!("   server rejected the request with code {code}");
            }
            std::process::exit(1);
        }
    }
}
