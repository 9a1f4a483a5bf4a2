//! Compensation engine for coaching staff
//!
//! This crate computes monthly compensation for coaching staff from
//! attendance and trainee-revenue data, persists one salary record per
//! employee per period, rolls the ledger over at period boundaries using a
//! trusted clock, and reconciles historical records with heterogeneous
//! period formats.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod rollover;
pub mod service;
pub mod store;
