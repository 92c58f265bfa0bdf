//! Sequenced list synchronisation shared by every dashboard view.
//!
//! [`ListSyncController`] is a plain state machine: it hands out
//! [`FetchTicket`]s and accepts their completions, committing only the one
//! currently in flight. [`ListSync`] drives it against a
//! [`crate::fetch::ListFetcher`].

pub mod controller;
pub mod driver;
pub mod resource;
pub mod state;

pub use controller::{FetchTicket, ListSyncController, SyncOutcome};
pub use driver::ListSync;
pub use resource::ListResource;
pub use state::{ControllerState, LocalMutation, ResourceState};
