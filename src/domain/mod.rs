//! Domain entities rendered by the dashboard list views.

pub mod alert;
pub mod client;
pub mod entity;
pub mod history;
pub mod types;
