//! Clock implementations.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use crate::error::EngineResult;

use super::TrustedClock;

/// A clock backed by the host process time.
///
/// Suitable when the engine itself runs on trusted infrastructure: the
/// server's clock is authoritative and no client device can skew it. Hosts
/// that delegate to a separate time authority implement [`TrustedClock`]
/// against that service instead.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl TrustedClock for SystemClock {
    async fn today(&self) -> EngineResult<NaiveDate> {
        Ok(Utc::now().date_naive())
    }
}

/// A clock pinned to a settable date, for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock pinned to the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Moves the clock to a new date.
    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }
}

impl TrustedClock for FixedClock {
    async fn today(&self) -> EngineResult<NaiveDate> {
        Ok(*self.today.lock().unwrap())
    }
}
