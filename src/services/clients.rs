//! Actions available on the corporate and individual client tables.

use crate::domain::client::{CONTACT_CHANNEL_WHATSAPP, Client, ClientPatch, ClientStats};
use crate::fetch::ListFetcher;
use crate::forms::filters::{ClientFilterForm, ClientFilterPayload};
use crate::query::ClientFilterSet;
use crate::services::ServiceResult;
use crate::sync::{ListResource, ListSync, SyncOutcome};

/// Records locally that the client was contacted over WhatsApp.
/// Returns `false` when the client is not on the displayed page.
pub fn mark_contacted<R, C>(list: &ListSync<R, C>, reference: &str) -> bool
where
    R: ListResource<Entity = Client>,
    C: ListFetcher,
{
    let patch = ClientPatch::contacted_via(CONTACT_CHANNEL_WHATSAPP);
    list.apply_local_mutation(reference, patch)
}

/// Validates the filter form and reloads the list from its first page.
pub async fn apply_filters<R, C>(
    list: &ListSync<R, C>,
    form: ClientFilterForm,
) -> ServiceResult<SyncOutcome>
where
    R: ListResource<Entity = Client>,
    R::Filters: ClientFilterSet,
    C: ListFetcher,
{
    let payload = ClientFilterPayload::try_from(form).map_err(|err| {
        log::error!("Failed to apply client filters: {err}");
        err
    })?;

    Ok(list.set_query(payload.into_update()).await)
}

/// Figures for the cards above the table, computed on the displayed page.
pub fn page_stats<R, C>(list: &ListSync<R, C>) -> ClientStats
where
    R: ListResource<Entity = Client>,
    C: ListFetcher,
{
    ClientStats::from_clients(&list.visible_items(""))
}
