use std::marker::PhantomData;

use serde_json::Value;

use crate::domain::entity::Entity;
use crate::domain::types::PageLimit;
use crate::dto::page::PageResult;
use crate::fetch::{FetchError, FetchResult};
use crate::query::{ListQuery, QueryUpdate, RequestDescriptor};
use crate::sync::{ControllerState, ListResource, LocalMutation, ResourceState};

/// A request handed out by the controller. Only the most recent ticket can
/// commit its result.
#[derive(Clone, Debug)]
pub struct FetchTicket<F> {
    seq: u64,
    query: ListQuery<F>,
    descriptor: RequestDescriptor,
}

impl<F> FetchTicket<F> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery<F> {
        &self.query
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The completion moved the controller to `Ready` or `Errored`.
    Applied,
    /// The ticket had been superseded; the completion was dropped.
    Stale,
}

/// Query, page and loading state of one list view.
#[derive(Debug)]
pub struct ListSyncController<R: ListResource> {
    query: ListQuery<R::Filters>,
    state: ResourceState<R>,
    next_seq: u64,
    in_flight: Option<u64>,
    _resource: PhantomData<R>,
}

impl<R: ListResource> ListSyncController<R> {
    pub fn new(limit: PageLimit) -> Self {
        Self::with_query(R::default_query(limit))
    }

    pub fn with_query(query: ListQuery<R::Filters>) -> Self {
        Self {
            query,
            state: ControllerState::Idle,
            next_seq: 0,
            in_flight: None,
            _resource: PhantomData,
        }
    }

    /// Last committed outcome, or `Loading` while the current query is in flight.
    pub fn state(&self) -> &ResourceState<R> {
        &self.state
    }

    /// Most recently requested query, committed or not.
    pub fn query(&self) -> &ListQuery<R::Filters> {
        &self.query
    }

    /// Merges `update` into the current query and starts loading it.
    pub fn set_query(&mut self, update: QueryUpdate<R::Filters>) -> FetchTicket<R::Filters> {
        self.query = self.query.merge(update);
        self.issue()
    }

    /// Re-issues the current query. Any request still in flight becomes stale.
    pub fn refetch(&mut self) -> FetchTicket<R::Filters> {
        self.issue()
    }

    /// Moves to the next page, if the last committed page reported more.
    pub fn next_page(&mut self) -> Option<FetchTicket<R::Filters>> {
        if !self.has_more() {
            return None;
        }
        let offset = self.query.next_offset();
        Some(self.set_query(QueryUpdate::new().offset(offset)))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket<R::Filters>> {
        if !self.can_go_previous() {
            return None;
        }
        let offset = self.query.previous_offset();
        Some(self.set_query(QueryUpdate::new().offset(offset)))
    }

    /// Whether the committed page reported rows beyond it.
    pub fn has_more(&self) -> bool {
        self.state.page().is_some_and(|page| page.has_more)
    }

    /// Whether the current query starts past the first page.
    pub fn can_go_previous(&self) -> bool {
        self.query.offset > 0
    }

    /// Whether `ticket` is the one request still allowed to commit.
    pub fn is_current(&self, ticket: &FetchTicket<R::Filters>) -> bool {
        self.in_flight == Some(ticket.seq)
    }

    /// Commits a decoded result if `ticket` is still in flight.
    pub fn complete(
        &mut self,
        ticket: FetchTicket<R::Filters>,
        result: FetchResult<PageResult<R::Entity>>,
    ) -> SyncOutcome {
        if !self.is_current(&ticket) {
            return self.discard(&ticket);
        }
        self.in_flight = None;

        self.state = match result {
            Ok(page) => {
                log::info!(
                    "Loaded {} {} at offset {} (more: {})",
                    page.items.len(),
                    R::NAME,
                    ticket.query.offset,
                    page.has_more
                );
                ControllerState::Ready {
                    query: ticket.query,
                    page,
                    mutations: Vec::new(),
                }
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", R::NAME);
                ControllerState::Errored {
                    query: ticket.query,
                    message: err.user_message(),
                }
            }
        };
        SyncOutcome::Applied
    }

    /// Decodes a raw body with the resource decoder, then commits it.
    /// Stale bodies are dropped without being decoded.
    pub fn complete_body(
        &mut self,
        ticket: FetchTicket<R::Filters>,
        body: FetchResult<Value>,
    ) -> SyncOutcome {
        if !self.is_current(&ticket) {
            return self.discard(&ticket);
        }
        let result = body.and_then(|body| {
            R::decode_page(body, &ticket.query).map_err(FetchError::from)
        });
        self.complete(ticket, result)
    }

    /// Patches every row keyed `entity_id` on the displayed page.
    ///
    /// Returns `false` and leaves the state untouched when nothing is
    /// displayed or no row matches.
    pub fn apply_local_mutation(
        &mut self,
        entity_id: &str,
        patch: <R::Entity as Entity>::Patch,
    ) -> bool {
        let ControllerState::Ready {
            page, mutations, ..
        } = &mut self.state
        else {
            return false;
        };

        let mut applied = false;
        for item in page.items.iter_mut().filter(|item| item.key() == entity_id) {
            item.apply_patch(&patch);
            applied = true;
        }
        if applied {
            log::debug!("Applied local change to {} {entity_id}", R::NAME);
            mutations.push(LocalMutation {
                entity_id: entity_id.to_string(),
                patch,
            });
        }
        applied
    }

    /// Visible rows of the displayed page matching `search` (case-insensitive,
    /// blank matches everything).
    pub fn visible_items(&self, search: &str) -> Vec<&R::Entity> {
        let needle = search.trim().to_lowercase();
        self.state
            .page()
            .map(|page| {
                page.items
                    .iter()
                    .filter(|item| item.is_visible())
                    .filter(|item| needle.is_empty() || item.matches_search(&needle))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn issue(&mut self) -> FetchTicket<R::Filters> {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(seq);
        self.state = ControllerState::Loading {
            query: self.query.clone(),
        };

        let descriptor = R::request(&self.query);
        log::debug!("Requesting {} #{seq}: {}", R::NAME, descriptor.path_and_query());

        FetchTicket {
            seq,
            query: self.query.clone(),
            descriptor,
        }
    }

    fn discard(&self, ticket: &FetchTicket<R::Filters>) -> SyncOutcome {
        log::debug!("Discarding stale {} response #{}", R::NAME, ticket.seq);
        SyncOutcome::Stale
    }
}
