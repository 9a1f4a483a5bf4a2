//! HTTP API module for the compensation engine.
//!
//! This module provides the REST endpoints a host uses to drive the engine:
//! triggering rollover and migration batches, recalculating one employee,
//! and querying salary records and available periods.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PeriodQuery;
pub use response::{ApiError, BatchResponse, PeriodsResponse};
pub use state::AppState;
