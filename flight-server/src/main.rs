use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use flight_server::aeroapi::AeroConfig;
use flight_server::tools::FlightTools;
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Get the API key from the environment
    let api_key = std::env::var("FLIGHTAWARE_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: FLIGHTAWARE_API_KEY not set. API calls will fail.");
        String::new()
    });

    let config = AeroConfig::new(&api_key);
    let tools = FlightTools::new(config).expect("Failed to create AeroAPI client");

    let state = AppState::new(tools);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Flight tool server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /health - Health check");
    println!("  POST /mcp    - MCP JSON-RPC (initialize, tools/list, tools/call)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
