//! Local handling of alert rows. Nothing is persisted server-side.

use crate::domain::alert::{Alert, AlertPatch, AlertStatus, SeverityBreakdown};
use crate::fetch::ListFetcher;
use crate::sync::{ListResource, ListSync};

/// Marks every alert of `reference` on the displayed page as resolved.
pub fn resolve<R, C>(list: &ListSync<R, C>, reference: &str) -> bool
where
    R: ListResource<Entity = Alert>,
    C: ListFetcher,
{
    list.apply_local_mutation(reference, AlertPatch::status(AlertStatus::Resolved))
}

/// Hides every alert of `reference` until the next fetch.
pub fn dismiss<R, C>(list: &ListSync<R, C>, reference: &str) -> bool
where
    R: ListResource<Entity = Alert>,
    C: ListFetcher,
{
    list.apply_local_mutation(reference, AlertPatch::status(AlertStatus::Dismissed))
}

/// Severity counts of the visible alerts on the displayed page.
pub fn severity_breakdown<R, C>(list: &ListSync<R, C>) -> SeverityBreakdown
where
    R: ListResource<Entity = Alert>,
    C: ListFetcher,
{
    SeverityBreakdown::from_alerts(&list.visible_items(""))
}
