//! Client core of the insurance back-office dashboard.
//!
//! Every table of the dashboard (corporate clients, individual clients,
//! alerts, activity history) is a [`sync::ListSyncController`] configured by
//! a [`sync::ListResource`] from [`services::resources`]. Requests are built
//! by [`query::QueryBuilder`] and sent by [`fetch::AuthenticatedFetchClient`]
//! with the token of the current [`session::AuthSession`].

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod fetch;
pub mod forms;
pub mod models;
pub mod query;
pub mod services;
pub mod session;
pub mod sync;

/// Rows requested per page unless configured otherwise.
pub const DEFAULT_PAGE_LIMIT: usize = 10;
