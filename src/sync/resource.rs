use serde_json::Value;

use crate::domain::entity::Entity;
use crate::domain::types::PageLimit;
use crate::dto::DtoResult;
use crate::dto::page::PageResult;
use crate::query::{FilterSet, ListQuery, RequestDescriptor};

/// Configuration of one list view: what it fetches and how the body is decoded.
pub trait ListResource {
    type Entity: Entity;
    type Filters: FilterSet;

    /// Label used in log lines.
    const NAME: &'static str;

    /// Query used before the user changes anything.
    fn default_query(limit: PageLimit) -> ListQuery<Self::Filters> {
        ListQuery::new(limit)
    }

    fn request(query: &ListQuery<Self::Filters>) -> RequestDescriptor;

    /// Decodes a successful body returned for `query`.
    fn decode_page(
        body: Value,
        query: &ListQuery<Self::Filters>,
    ) -> DtoResult<PageResult<Self::Entity>>;
}
