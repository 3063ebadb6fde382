//! Domain logic for flight queries.
//!
//! Time-window resolution and display-timezone localization. Both are
//! pure: the window resolver takes the current instant as an argument,
//! so all invariants can be tested against a pinned clock.

mod localize;
mod window;

pub use localize::{TIMESTAMP_FIELDS, localize, localize_batch};
pub use window::{
    DateParts, MAX_FUTURE_HOURS, MAX_PAST_DAYS, TimeWindow, WindowError, resolve_decomposed,
    resolve_explicit,
};
