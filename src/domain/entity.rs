//! Behaviour shared by every row type a list view can hold.

use std::fmt::Debug;

/// A row of one of the dashboard lists, reconciled by a stable key.
pub trait Entity: Clone + Debug {
    /// Partial update applied by local optimistic mutations.
    type Patch: Clone + Debug;

    /// Stable identifier used to match local mutations against the page.
    fn key(&self) -> &str;

    /// Merges the fields carried by `patch` into the entity, leaving the rest untouched.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Case-insensitive match for the table search box. `needle` is already lower-cased.
    fn matches_search(&self, needle: &str) -> bool;

    /// Whether the row is still shown. Rows hidden locally stay in the page.
    fn is_visible(&self) -> bool {
        true
    }
}

/// Patch type for entities that do not support local mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoPatch {}

/// Lower-cases `haystack` and checks whether it contains the lower-cased `needle`.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Same as [`contains_folded`] for optional attributes; `None` never matches.
pub(crate) fn option_contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| contains_folded(value, needle))
}
