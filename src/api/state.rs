//! Application state for the compensation engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service behind an `Arc` so every request handler sees
/// the same injected stores and clock.
pub struct AppState<D, L, C> {
    service: Arc<PayrollService<D, L, C>>,
}

impl<D, L, C> AppState<D, L, C> {
    /// Creates a new application state over the given service.
    pub fn new(service: PayrollService<D, L, C>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the payroll service.
    pub fn service(&self) -> &PayrollService<D, L, C> {
        &self.service
    }
}

// Derived Clone would require D/L/C to be Clone; only the Arc is cloned.
impl<D, L, C> Clone for AppState<D, L, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
