//! Activity log returned by `/history/` as a bare JSON array.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::history::HistoryEntry;
use crate::domain::types::HistoryEntryId;
use crate::dto::page::PageResult;
use crate::dto::{DtoResult, opt_string_or_number, string_or_number};

#[derive(Debug, Deserialize)]
pub struct HistoryEntryDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub client_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TryFrom<HistoryEntryDto> for HistoryEntry {
    type Error = crate::dto::DtoError;

    fn try_from(dto: HistoryEntryDto) -> DtoResult<Self> {
        Ok(HistoryEntry {
            id: HistoryEntryId::new(dto.id)?,
            timestamp: dto.timestamp,
            action: dto.action,
            user: dto.user,
            details: dto.details,
            client_ref: dto.client_ref,
            extra: dto.extra,
        })
    }
}

/// The history endpoint is not paginated, so the decoded page is always the last one.
pub fn decode_history(body: Value) -> DtoResult<PageResult<HistoryEntry>> {
    let rows: Vec<HistoryEntryDto> = serde_json::from_value(body)?;
    let items = rows
        .into_iter()
        .map(HistoryEntry::try_from)
        .collect::<DtoResult<Vec<_>>>()?;
    Ok(PageResult::last(items))
}
