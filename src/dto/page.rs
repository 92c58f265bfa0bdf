//! Pagination envelope returned by the list endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::types::PageLimit;
use crate::dto::DtoResult;

/// `{ items, has_more? }` body of the paginated endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageEnvelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: Option<bool>,
}

/// `"items": null` reads as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of decoded entities.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// A page that is known to be the last one.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false)
    }
}

/// Resolves the "more pages" flag.
///
/// An explicit flag from the backend wins. Otherwise a full page is taken to
/// mean more data exists, so a final page of exactly `limit` items still
/// reports `true`.
pub fn infer_has_more(explicit: Option<bool>, returned: usize, limit: PageLimit) -> bool {
    explicit.unwrap_or(returned == limit.get())
}

impl<T: DeserializeOwned> PageEnvelope<T> {
    pub fn from_value(body: Value) -> DtoResult<Self> {
        Ok(serde_json::from_value(body)?)
    }

    /// Maps every item with `f` and resolves `has_more` against `limit`.
    pub fn try_into_page<U, F>(self, limit: PageLimit, f: F) -> DtoResult<PageResult<U>>
    where
        F: FnMut(T) -> DtoResult<U>,
    {
        let has_more = infer_has_more(self.has_more, self.items.len(), limit);
        let items: Vec<U> = self.items.into_iter().map(f).collect::<DtoResult<_>>()?;
        Ok(PageResult::new(items, has_more))
    }
}
