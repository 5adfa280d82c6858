//! Core types for calgrid.
//!
//! - `store`: the date-bucketed event store with overlap checking
//! - `search`: the search filter view
//! - `export`: JSON/CSV export and the store document format
//! - `grid`: the 6x7 month grid
//! - `storage`: key-value persistence slots
//! - `config`: user configuration

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod grid;
pub mod search;
pub mod storage;
pub mod store;

pub use error::{CalGridError, CalGridResult};
pub use event::{ClockTime, Event, EventColor};
pub use store::{Buckets, EventStore, MoveOutcome, MovePolicy};
