//! Runtime settings of the dashboard.

pub mod config;
