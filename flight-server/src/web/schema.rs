//! MCP tool descriptions advertised via `tools/list`.

use serde_json::{Value, json};

/// Shared window parameters for the board and schedule tools.
fn window_properties() -> Value {
    json!({
        "start": {
            "type": "string",
            "description": "Window start, ISO 8601 UTC (e.g. '2024-03-15T10:00:00Z'). Defaults to one hour ago. At most 10 days in the past."
        },
        "end": {
            "type": "string",
            "description": "Window end, ISO 8601 UTC. Defaults to one hour from now. At most 24 hours in the future."
        },
        "fetch_all": {
            "type": "boolean",
            "description": "Follow pagination and return every page. Defaults to false (first page only)."
        }
    })
}

fn board_schema(description: &str) -> Value {
    let mut properties = window_properties();
    properties["airport_code"] = json!({
        "type": "string",
        "description": "ICAO or IATA airport code (e.g. 'RJTT', 'HND')"
    });
    json!({
        "type": "object",
        "properties": properties,
        "required": ["airport_code"],
        "description": description,
    })
}

/// Tool catalog for `tools/list`.
pub fn tool_catalog() -> Value {
    let mut schedule_properties = window_properties();
    for (name, description) in [
        ("origin", "Filter by origin airport code"),
        ("destination", "Filter by destination airport code"),
        ("airline", "Filter by airline code (e.g. 'ANA')"),
        ("flight_number", "Filter by flight number"),
    ] {
        schedule_properties[name] = json!({"type": "string", "description": description});
    }

    json!([
        {
            "name": "get_departures",
            "description": "List flights departing an airport within a time window. Timestamps are reported in JST (UTC+9).",
            "inputSchema": board_schema("Departure board query"),
        },
        {
            "name": "get_arrivals",
            "description": "List flights arriving at an airport within a time window. Timestamps are reported in JST (UTC+9).",
            "inputSchema": board_schema("Arrival board query"),
        },
        {
            "name": "get_schedules",
            "description": "List published flight schedules within a time window, optionally filtered by origin, destination, airline, or flight number.",
            "inputSchema": {
                "type": "object",
                "properties": schedule_properties,
            },
        },
        {
            "name": "get_flight_track",
            "description": "Fetch the positional track of a single flight by its FlightAware flight id.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "fa_flight_id": {
                        "type": "string",
                        "description": "FlightAware flight id (e.g. 'ANA182-1747206976-airline-1811p')"
                    }
                },
                "required": ["fa_flight_id"],
            },
        },
    ])
}
