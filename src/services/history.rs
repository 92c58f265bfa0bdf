//! Read-only figures for the activity log.

use chrono::{Local, NaiveDateTime};

use crate::domain::history::{HistoryEntry, HistoryStats};
use crate::fetch::ListFetcher;
use crate::sync::{ListResource, ListSync};

/// Figures for the cards above the log, as of the local time now.
pub fn page_stats<R, C>(list: &ListSync<R, C>) -> HistoryStats
where
    R: ListResource<Entity = HistoryEntry>,
    C: ListFetcher,
{
    page_stats_at(list, Local::now().naive_local())
}

/// Figures for the cards above the log, as of `now`.
pub fn page_stats_at<R, C>(list: &ListSync<R, C>, now: NaiveDateTime) -> HistoryStats
where
    R: ListResource<Entity = HistoryEntry>,
    C: ListFetcher,
{
    HistoryStats::from_entries(&list.visible_items(""), now)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::types::PageLimit;
    use crate::fetch::FetchResult;
    use crate::query::RequestDescriptor;
    use crate::services::resources::History;
    use crate::sync::ListSyncController;

    struct FixedFetcher(Value);

    impl ListFetcher for FixedFetcher {
        async fn fetch(&self, _descriptor: &RequestDescriptor) -> FetchResult<Value> {
            Ok(self.0.clone())
        }
    }

    async fn loaded(body: Value) -> ListSync<History, FixedFetcher> {
        let controller = ListSyncController::new(PageLimit::default());
        let list = ListSync::new(controller, FixedFetcher(body));
        list.refetch().await;
        list
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-05-11 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn stats_cover_the_loaded_log() {
        let list = loaded(json!([
            { "id": 3, "timestamp": "2024-05-01T10:00:00", "action": "Client updated" },
            { "id": 2, "timestamp": "2024-05-01T08:30:00", "action": "User login" },
            { "id": 1, "timestamp": "2024-04-28T16:00:00", "action": "Client created" }
        ]))
        .await;

        let stats = page_stats_at(&list, now());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.days_tracked, 10);
    }

    #[tokio::test]
    async fn stats_before_loading_are_zero() {
        let controller = ListSyncController::<History>::new(PageLimit::default());
        let list = ListSync::new(controller, FixedFetcher(json!([])));

        assert_eq!(page_stats(&list), HistoryStats::default());
    }
}
