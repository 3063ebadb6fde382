//! Agent-facing flight tools.
//!
//! Each tool resolves a query window, builds the upstream request, runs
//! the paginated fetch, and hands back localized records. Errors stay
//! structured here; the web layer renders them to the plain strings the
//! agent sees.

use std::fmt;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::aeroapi::{
    AeroClient, AeroConfig, AeroError, FetchOutcome, PageSource, QueryRequest, fetch_records,
};
use crate::domain::{DateParts, TimeWindow, WindowError, resolve_decomposed, resolve_explicit};

/// Window input for a tool call. Deployments wire one shape into the
/// tool schema; both are accepted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowParams {
    /// Explicit ISO 8601 bounds, either of which may be omitted.
    Explicit {
        start: Option<String>,
        end: Option<String>,
    },
    /// Calendar fragments, each defaulting independently.
    Decomposed(DateParts),
}

/// Optional filters for the schedules tool, forwarded as query
/// parameters only when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilters {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
}

/// Errors from a tool invocation.
#[derive(Debug)]
pub enum ToolError {
    /// The caller's temporal input did not resolve to a valid window.
    Window(WindowError),
    /// The upstream fetch failed before any data arrived.
    Upstream(AeroError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Window(e) => write!(f, "{e}"),
            ToolError::Upstream(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Window(e) => Some(e),
            ToolError::Upstream(e) => Some(e),
        }
    }
}

impl From<WindowError> for ToolError {
    fn from(err: WindowError) -> Self {
        ToolError::Window(err)
    }
}

impl From<AeroError> for ToolError {
    fn from(err: AeroError) -> Self {
        ToolError::Upstream(err)
    }
}

/// The flight tool facade.
///
/// Holds the configured AeroAPI client; one instance serves all calls.
/// No state is shared between calls beyond the client itself.
#[derive(Debug, Clone)]
pub struct FlightTools {
    client: AeroClient,
}

impl FlightTools {
    /// Create the facade from an explicit client configuration.
    pub fn new(config: AeroConfig) -> Result<Self, AeroError> {
        Ok(Self {
            client: AeroClient::new(config)?,
        })
    }

    fn resolve(&self, window: &WindowParams) -> Result<TimeWindow, WindowError> {
        let now = Utc::now();
        match window {
            WindowParams::Explicit { start, end } => {
                resolve_explicit(start.as_deref(), end.as_deref(), now)
            }
            WindowParams::Decomposed(parts) => resolve_decomposed(parts, now),
        }
    }

    fn board_request(&self, airport: &str, kind: &'static str, window: &TimeWindow) -> QueryRequest {
        QueryRequest {
            url: format!(
                "{}/airports/{airport}/flights/{kind}",
                self.client.base_url()
            ),
            params: Some(vec![
                ("start".to_string(), window.start_iso()),
                ("end".to_string(), window.end_iso()),
            ]),
            data_key: kind,
        }
    }

    fn schedule_request(&self, window: &TimeWindow, filters: &ScheduleFilters) -> QueryRequest {
        let mut params = Vec::new();
        for (name, value) in [
            ("origin", &filters.origin),
            ("destination", &filters.destination),
            ("airline", &filters.airline),
            ("flight_number", &filters.flight_number),
        ] {
            if let Some(value) = value {
                params.push((name.to_string(), value.clone()));
            }
        }

        QueryRequest {
            url: format!(
                "{}/schedules/{}/{}",
                self.client.base_url(),
                window.start_iso(),
                window.end_iso()
            ),
            params: if params.is_empty() { None } else { Some(params) },
            data_key: "scheduled",
        }
    }

    async fn board(
        &self,
        airport: &str,
        kind: &'static str,
        window: &WindowParams,
        fetch_all: bool,
    ) -> Result<FetchOutcome, ToolError> {
        let window = self.resolve(window)?;
        info!(airport, kind, start = %window.start_iso(), end = %window.end_iso(), "flight board query");
        let request = self.board_request(airport, kind, &window);
        Ok(fetch_records(&self.client, self.client.base_url(), request, fetch_all).await?)
    }

    /// Departing flights for an airport within the resolved window.
    pub async fn get_departures(
        &self,
        airport: &str,
        window: &WindowParams,
        fetch_all: bool,
    ) -> Result<FetchOutcome, ToolError> {
        self.board(airport, "departures", window, fetch_all).await
    }

    /// Arriving flights for an airport within the resolved window.
    pub async fn get_arrivals(
        &self,
        airport: &str,
        window: &WindowParams,
        fetch_all: bool,
    ) -> Result<FetchOutcome, ToolError> {
        self.board(airport, "arrivals", window, fetch_all).await
    }

    /// Published schedules within the resolved window, optionally
    /// filtered by origin/destination/airline/flight number.
    pub async fn get_schedules(
        &self,
        window: &WindowParams,
        filters: &ScheduleFilters,
        fetch_all: bool,
    ) -> Result<FetchOutcome, ToolError> {
        let window = self.resolve(window)?;
        info!(start = %window.start_iso(), end = %window.end_iso(), ?filters, "schedule query");
        let request = self.schedule_request(&window, filters);
        Ok(fetch_records(&self.client, self.client.base_url(), request, fetch_all).await?)
    }

    /// Positional track for a single flight, by FlightAware flight id.
    ///
    /// One-shot lookup: no window, no pagination, and positions carry
    /// epoch timestamps so nothing is localized.
    pub async fn get_flight_track(&self, fa_flight_id: &str) -> Result<Value, ToolError> {
        let url = format!("{}/flights/{fa_flight_id}/track", self.client.base_url());
        info!(fa_flight_id, "flight track query");
        Ok(self.client.fetch_page(&url, None).await?)
    }
}
