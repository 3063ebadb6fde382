//! Flight-board tool server.
//!
//! Exposes FlightAware AeroAPI flight data (departures, arrivals,
//! schedules, flight tracks) as MCP tools for an LLM-driven agent.

pub mod aeroapi;
pub mod domain;
pub mod tools;
pub mod web;
