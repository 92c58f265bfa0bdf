use std::cell::{Ref, RefCell};

use crate::domain::entity::Entity;
use crate::fetch::ListFetcher;
use crate::query::QueryUpdate;
use crate::sync::{FetchTicket, ListResource, ListSyncController, ResourceState, SyncOutcome};

/// Runs a [`ListSyncController`] against a fetcher on a single-threaded executor.
///
/// The controller is only borrowed between awaits, so overlapping calls each
/// get their own ticket and the controller decides which one commits.
pub struct ListSync<R: ListResource, C> {
    controller: RefCell<ListSyncController<R>>,
    fetcher: C,
}

impl<R, C> ListSync<R, C>
where
    R: ListResource,
    C: ListFetcher,
{
    pub fn new(controller: ListSyncController<R>, fetcher: C) -> Self {
        Self {
            controller: RefCell::new(controller),
            fetcher,
        }
    }

    /// Borrows the controller. Drop the guard before awaiting any method of
    /// this `ListSync`: completing a request needs the controller mutably and
    /// panics while a guard is alive.
    pub fn controller(&self) -> Ref<'_, ListSyncController<R>> {
        self.controller.borrow()
    }

    /// Owned snapshot of the current state, safe to keep across awaits.
    pub fn state(&self) -> ResourceState<R> {
        self.controller.borrow().state().clone()
    }

    pub fn has_more(&self) -> bool {
        self.controller.borrow().has_more()
    }

    pub fn can_go_previous(&self) -> bool {
        self.controller.borrow().can_go_previous()
    }

    pub fn fetcher(&self) -> &C {
        &self.fetcher
    }

    pub async fn set_query(&self, update: QueryUpdate<R::Filters>) -> SyncOutcome {
        let ticket = self.controller.borrow_mut().set_query(update);
        self.run(ticket).await
    }

    pub async fn refetch(&self) -> SyncOutcome {
        let ticket = self.controller.borrow_mut().refetch();
        self.run(ticket).await
    }

    /// `None` when the current page reported no more rows.
    pub async fn next_page(&self) -> Option<SyncOutcome> {
        let ticket = self.controller.borrow_mut().next_page()?;
        Some(self.run(ticket).await)
    }

    /// `None` when already on the first page.
    pub async fn previous_page(&self) -> Option<SyncOutcome> {
        let ticket = self.controller.borrow_mut().previous_page()?;
        Some(self.run(ticket).await)
    }

    pub fn apply_local_mutation(
        &self,
        entity_id: &str,
        patch: <R::Entity as Entity>::Patch,
    ) -> bool {
        self.controller
            .borrow_mut()
            .apply_local_mutation(entity_id, patch)
    }

    /// Owned copies of the rows matching `search`.
    pub fn visible_items(&self, search: &str) -> Vec<R::Entity> {
        self.controller
            .borrow()
            .visible_items(search)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn run(&self, ticket: FetchTicket<R::Filters>) -> SyncOutcome {
        let body = self.fetcher.fetch(ticket.descriptor()).await;
        self.controller.borrow_mut().complete_body(ticket, body)
    }
}
