//! Web layer: the MCP JSON-RPC endpoint consumed by the agent framework.

mod handlers;
mod routes;
mod rpc;
mod schema;
mod state;

pub use routes::create_router;
pub use state::AppState;
