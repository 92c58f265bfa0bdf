//! The four dashboard lists, each a thin configuration of [`ListResource`].

use serde_json::Value;

use crate::domain::alert::Alert;
use crate::domain::client::{Client, ClientKind};
use crate::domain::history::HistoryEntry;
use crate::domain::types::{PageLimit, SortDirection};
use crate::dto::DtoResult;
use crate::dto::alert::decode_alert_page;
use crate::dto::client::decode_client_page;
use crate::dto::history::decode_history;
use crate::dto::page::PageResult;
use crate::query::{
    CorporateFilters, FilterSet, IndividualFilters, ListQuery, NoFilters, QueryBuilder,
    RequestDescriptor,
};
use crate::sync::ListResource;

pub const CORPORATE_CLIENTS_PATH: &str = "/clients/morale";
pub const INDIVIDUAL_CLIENTS_PATH: &str = "/clients/physique";
pub const ALERTS_PATH: &str = "/alerts";
pub const HISTORY_PATH: &str = "/history/";

/// Paginated endpoints are asked not to compute a total row count.
const PAGINATED: &[(&str, &str)] = &[("include_total", "false")];

const fn paginated(path: &'static str) -> QueryBuilder {
    QueryBuilder::new(path).with_fixed(PAGINATED)
}

const CORPORATE: QueryBuilder = paginated(CORPORATE_CLIENTS_PATH);
const INDIVIDUAL: QueryBuilder = paginated(INDIVIDUAL_CLIENTS_PATH);
const ALERTS: QueryBuilder = paginated(ALERTS_PATH);

fn best_scores_first<F: FilterSet>(limit: PageLimit) -> ListQuery<F> {
    ListQuery::new(limit).sorted("score", SortDirection::Desc)
}

/// Corporate clients (`personnes morales`).
#[derive(Debug)]
pub struct CorporateClients;

impl ListResource for CorporateClients {
    type Entity = Client;
    type Filters = CorporateFilters;

    const NAME: &'static str = "corporate clients";

    fn default_query(limit: PageLimit) -> ListQuery<CorporateFilters> {
        best_scores_first(limit)
    }

    fn request(query: &ListQuery<CorporateFilters>) -> RequestDescriptor {
        CORPORATE.build(query)
    }

    fn decode_page(
        body: Value,
        query: &ListQuery<CorporateFilters>,
    ) -> DtoResult<PageResult<Client>> {
        decode_client_page(body, ClientKind::Moral, query.limit)
    }
}

/// Individual clients (`personnes physiques`).
#[derive(Debug)]
pub struct IndividualClients;

impl ListResource for IndividualClients {
    type Entity = Client;
    type Filters = IndividualFilters;

    const NAME: &'static str = "individual clients";

    fn default_query(limit: PageLimit) -> ListQuery<IndividualFilters> {
        best_scores_first(limit)
    }

    fn request(query: &ListQuery<IndividualFilters>) -> RequestDescriptor {
        INDIVIDUAL.build(query)
    }

    fn decode_page(
        body: Value,
        query: &ListQuery<IndividualFilters>,
    ) -> DtoResult<PageResult<Client>> {
        decode_client_page(body, ClientKind::Physique, query.limit)
    }
}

#[derive(Debug)]
pub struct Alerts;

impl ListResource for Alerts {
    type Entity = Alert;
    type Filters = NoFilters;

    const NAME: &'static str = "alerts";

    fn request(query: &ListQuery<NoFilters>) -> RequestDescriptor {
        ALERTS.build(query)
    }

    fn decode_page(body: Value, query: &ListQuery<NoFilters>) -> DtoResult<PageResult<Alert>> {
        decode_alert_page(body, query.limit)
    }
}

/// Activity log. The endpoint returns everything at once.
#[derive(Debug)]
pub struct History;

impl ListResource for History {
    type Entity = HistoryEntry;
    type Filters = NoFilters;

    const NAME: &'static str = "history entries";

    fn request(_query: &ListQuery<NoFilters>) -> RequestDescriptor {
        RequestDescriptor::get(HISTORY_PATH)
    }

    fn decode_page(
        body: Value,
        _query: &ListQuery<NoFilters>,
    ) -> DtoResult<PageResult<HistoryEntry>> {
        decode_history(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::QueryUpdate;
    use crate::sync::ListSyncController;

    #[test]
    fn corporate_default_request_matches_the_backend_contract() {
        let mut controller = ListSyncController::<CorporateClients>::new(PageLimit::default());

        let ticket = controller.refetch();

        assert_eq!(
            ticket.descriptor().path_and_query(),
            "/clients/morale?limit=10&offset=0&include_total=false&sort_by=score&sort_dir=desc"
        );
    }

    #[test]
    fn individual_filters_use_their_own_names() {
        let mut controller = ListSyncController::<IndividualClients>::new(PageLimit::default());

        let filters = IndividualFilters {
            client_segment: Some("Premium".to_string()),
            risk_profile: None,
        };

        let ticket = controller.set_query(QueryUpdate::new().filters(filters));

        assert_eq!(ticket.descriptor().path, INDIVIDUAL_CLIENTS_PATH);
        assert_eq!(ticket.descriptor().param("client_segment"), Some("Premium"));
        assert_eq!(ticket.descriptor().param("risk_profile"), None);
    }

    #[test]
    fn alerts_are_paginated_without_sort() {
        let mut controller = ListSyncController::<Alerts>::new(PageLimit::default());

        let ticket = controller.refetch();

        assert_eq!(
            ticket.descriptor().path_and_query(),
            "/alerts?limit=10&offset=0&include_total=false"
        );
    }

    #[test]
    fn history_is_fetched_whole() {
        let mut controller = ListSyncController::<History>::new(PageLimit::default());

        let ticket = controller.refetch();
        assert_eq!(ticket.descriptor().path_and_query(), HISTORY_PATH);

        let rows: Vec<_> = (0..10)
            .map(|i| json!({ "id": i, "timestamp": "2024-01-01T00:00:00", "action": "login" }))
            .collect();
        controller.complete_body(ticket, Ok(json!(rows)));

        assert_eq!(controller.visible_items("").len(), 10);
        assert!(!controller.has_more());
    }
}
