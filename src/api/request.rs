//! Request types for the compensation engine API.
//!
//! The engine's mutating endpoints take no body; the only client-supplied
//! inputs are path and query parameters addressing employees and periods.

use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::PeriodKey;

/// Query parameters addressing one payroll period.
///
/// The period is accepted in either supported form ("January 2024" or
/// "2024-01") and normalized before use.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
    /// The requested period.
    pub period: String,
}

impl PeriodQuery {
    /// Parses the raw period parameter into a canonical key.
    pub fn parse(&self) -> EngineResult<PeriodKey> {
        self.period.parse()
    }
}
