//! JSON-RPC request handling for the MCP endpoint.
//!
//! This is the outermost boundary: structured tool errors are rendered
//! to the plain strings the agent sees (`"Input Error: ..."` for window
//! validation, `"Failed to retrieve data."` for an upstream failure).

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::aeroapi::FetchOutcome;
use crate::tools::{ScheduleFilters, ToolError, WindowParams};

use super::rpc::{
    INVALID_PARAMS, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest,
    JsonRpcRequestWithParams, JsonRpcRequestWithoutParams, JsonRpcResponse, METHOD_NOT_FOUND,
    PARSE_ERROR, ToolCallParams,
};
use super::schema::tool_catalog;
use super::state::AppState;

/// Arguments shared by the departures and arrivals tools.
#[derive(Debug, Deserialize)]
struct BoardArgs {
    airport_code: String,
    start: Option<String>,
    end: Option<String>,
    #[serde(default)]
    fetch_all: bool,
}

/// Arguments for the schedules tool.
#[derive(Debug, Deserialize)]
struct ScheduleArgs {
    start: Option<String>,
    end: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    airline: Option<String>,
    flight_number: Option<String>,
    #[serde(default)]
    fetch_all: bool,
}

/// Arguments for the flight track tool.
#[derive(Debug, Deserialize)]
struct TrackArgs {
    fa_flight_id: String,
}

/// Entry point for `POST /mcp`.
pub async fn mcp_handler(
    State(state): State<AppState>,
    Json(request_value): Json<Value>,
) -> Response {
    let id = request_value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(request_value) {
        Ok(JsonRpcRequest::WithParams(req)) => handle_with_params(&state, req).await,
        Ok(JsonRpcRequest::WithoutParams(req)) => handle_without_params(req),
        Ok(JsonRpcRequest::Notification(req)) => handle_notification(req),
        Err(_) => error_response(id, PARSE_ERROR, "Parse error"),
    }
}

async fn handle_with_params(state: &AppState, req: JsonRpcRequestWithParams) -> Response {
    match req.method.as_str() {
        "initialize" => result_response(
            req.id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": "flight-server",
                    "version": env!("CARGO_PKG_VERSION"),
                }
            }),
        ),
        "tools/list" => result_response(req.id, json!({ "tools": tool_catalog() })),
        "tools/call" => {
            let params: ToolCallParams = match serde_json::from_value(req.params) {
                Ok(params) => params,
                Err(e) => {
                    return error_response(
                        req.id,
                        INVALID_PARAMS,
                        format!("Invalid params for tools/call: {e}"),
                    );
                }
            };
            match call_tool(state, &params.name, params.arguments).await {
                Ok(result) => result_response(req.id, result),
                Err(dispatch) => error_response(req.id, dispatch.code, dispatch.message),
            }
        }
        _ => error_response(req.id, METHOD_NOT_FOUND, "Method not found"),
    }
}

fn handle_without_params(req: JsonRpcRequestWithoutParams) -> Response {
    match req.method.as_str() {
        "tools/list" => result_response(req.id, json!({ "tools": tool_catalog() })),
        _ => error_response(req.id, METHOD_NOT_FOUND, "Method not found"),
    }
}

fn handle_notification(_req: JsonRpcNotification) -> Response {
    // Notifications expect no response payload
    StatusCode::ACCEPTED.into_response()
}

/// A protocol-level dispatch failure (unknown tool, malformed args).
#[derive(Debug)]
struct DispatchError {
    code: i32,
    message: String,
}

impl DispatchError {
    fn invalid_params(tool: &str, err: impl std::fmt::Display) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: format!("Invalid params for {tool}: {err}"),
        }
    }
}

/// Dispatch a `tools/call` to the facade.
async fn call_tool(state: &AppState, name: &str, arguments: Value) -> Result<Value, DispatchError> {
    // Clients may omit `arguments` entirely
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    match name {
        "get_departures" | "get_arrivals" => {
            let args: BoardArgs = serde_json::from_value(arguments)
                .map_err(|e| DispatchError::invalid_params(name, e))?;
            let window = WindowParams::Explicit {
                start: args.start,
                end: args.end,
            };
            let outcome = if name == "get_departures" {
                state
                    .tools
                    .get_departures(&args.airport_code, &window, args.fetch_all)
                    .await
            } else {
                state
                    .tools
                    .get_arrivals(&args.airport_code, &window, args.fetch_all)
                    .await
            };
            Ok(render_outcome(outcome))
        }
        "get_schedules" => {
            let args: ScheduleArgs = serde_json::from_value(arguments)
                .map_err(|e| DispatchError::invalid_params(name, e))?;
            let window = WindowParams::Explicit {
                start: args.start,
                end: args.end,
            };
            let filters = ScheduleFilters {
                origin: args.origin,
                destination: args.destination,
                airline: args.airline,
                flight_number: args.flight_number,
            };
            let outcome = state
                .tools
                .get_schedules(&window, &filters, args.fetch_all)
                .await;
            Ok(render_outcome(outcome))
        }
        "get_flight_track" => {
            let args: TrackArgs = serde_json::from_value(arguments)
                .map_err(|e| DispatchError::invalid_params(name, e))?;
            match state.tools.get_flight_track(&args.fa_flight_id).await {
                Ok(track) => Ok(tool_content(track.to_string(), false)),
                Err(err) => Ok(tool_content(render_tool_error(&err), true)),
            }
        }
        _ => Err(DispatchError {
            code: METHOD_NOT_FOUND,
            message: format!("Unknown tool: {name}"),
        }),
    }
}

/// Render a fetch outcome as MCP text content.
fn render_outcome(outcome: Result<FetchOutcome, ToolError>) -> Value {
    match outcome {
        Ok(outcome) => {
            let payload = json!({
                "flights": outcome.records,
                "truncated": outcome.truncated,
            });
            tool_content(payload.to_string(), false)
        }
        Err(err) => {
            warn!(%err, "tool call failed");
            tool_content(render_tool_error(&err), true)
        }
    }
}

/// The agent-facing error strings. Window validation failures carry
/// their reason; upstream failures are deliberately opaque.
fn render_tool_error(err: &ToolError) -> String {
    match err {
        ToolError::Window(e) => format!("Input Error: {e}"),
        ToolError::Upstream(_) => "Failed to retrieve data.".to_string(),
    }
}

fn tool_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

fn result_response(id: Value, result: Value) -> Response {
    Json(JsonRpcResponse::new(id, result)).into_response()
}

fn error_response(id: Value, code: i32, message: impl Into<String>) -> Response {
    Json(JsonRpcErrorResponse::new(id, code, message)).into_response()
}
