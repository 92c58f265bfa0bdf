use crate::domain::entity::Entity;
use crate::dto::page::PageResult;
use crate::query::ListQuery;
use crate::sync::ListResource;

/// Optimistic edit applied to the displayed page. Never sent to the backend.
#[derive(Clone, Debug)]
pub struct LocalMutation<P> {
    pub entity_id: String,
    pub patch: P,
}

#[derive(Clone, Debug)]
pub enum ControllerState<E: Entity, F> {
    Idle,
    Loading {
        query: ListQuery<F>,
    },
    Ready {
        query: ListQuery<F>,
        page: PageResult<E>,
        /// Edits already merged into `page`, oldest first.
        mutations: Vec<LocalMutation<E::Patch>>,
    },
    Errored {
        query: ListQuery<F>,
        message: String,
    },
}

pub type ResourceState<R> =
    ControllerState<<R as ListResource>::Entity, <R as ListResource>::Filters>;

impl<E: Entity, F> ControllerState<E, F> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ControllerState::Loading { .. })
    }

    /// Query the state refers to; `None` while idle.
    pub fn query(&self) -> Option<&ListQuery<F>> {
        match self {
            ControllerState::Idle => None,
            ControllerState::Loading { query }
            | ControllerState::Ready { query, .. }
            | ControllerState::Errored { query, .. } => Some(query),
        }
    }

    pub fn page(&self) -> Option<&PageResult<E>> {
        match self {
            ControllerState::Ready { page, .. } => Some(page),
            _ => None,
        }
    }

    pub fn mutations(&self) -> &[LocalMutation<E::Patch>] {
        match self {
            ControllerState::Ready { mutations, .. } => mutations,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ControllerState::Errored { message, .. } => Some(message),
            _ => None,
        }
    }
}
