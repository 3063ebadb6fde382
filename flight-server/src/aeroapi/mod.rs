//! FlightAware AeroAPI client.
//!
//! HTTP client and pagination loop for the AeroAPI flight-data REST
//! service. Key characteristics of AeroAPI:
//! - Auth is a static key in an `x-apikey` header
//! - Responses are JSON envelopes with the record array under a named
//!   key (`departures`, `arrivals`, `scheduled`)
//! - Multi-page responses carry a relative continuation path in
//!   `links.next`

mod client;
mod error;
mod fetch;

pub use client::{AeroClient, AeroConfig};
pub use error::AeroError;
pub use fetch::{FetchOutcome, MAX_PAGES, PageSource, QueryRequest, fetch_records};
