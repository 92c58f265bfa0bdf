use serde::Deserialize;

use crate::domain::types::SortDirection;
use crate::forms::FormError;
use crate::query::QueryUpdate;
use crate::query::filters::{CLIENT_SORT_FIELDS, ClientFilterSet};

#[derive(Debug, Default, Deserialize)]
/// Sort and filter controls above a client table. Every field may be left blank.
pub struct ClientFilterForm {
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub sort_dir: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub risk: String,
}

/// Checked filter form. Blank inputs are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilterPayload {
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub segment: Option<String>,
    pub risk: Option<String>,
}

fn trimmed(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

impl TryFrom<ClientFilterForm> for ClientFilterPayload {
    type Error = FormError;

    fn try_from(form: ClientFilterForm) -> Result<Self, Self::Error> {
        let sort_by = trimmed(&form.sort_by);
        if let Some(field) = &sort_by
            && !CLIENT_SORT_FIELDS.contains(&field.as_str())
        {
            return Err(FormError::InvalidSortField(field.clone()));
        }

        let sort_dir = trimmed(&form.sort_dir)
            .map(|dir| {
                SortDirection::try_from(dir.as_str())
                    .map_err(|_| FormError::InvalidSortDirection(dir.clone()))
            })
            .transpose()?;

        Ok(Self {
            sort_by,
            sort_dir,
            segment: trimmed(&form.segment),
            risk: trimmed(&form.risk),
        })
    }
}

impl ClientFilterPayload {
    /// Query update replacing the filters. An unset sort keeps the current one.
    pub fn into_update<F: ClientFilterSet>(self) -> QueryUpdate<F> {
        let filters = F::from_parts(self.segment, self.risk);
        let mut update = QueryUpdate::new().filters(filters);
        if let Some(sort_by) = self.sort_by {
            update = update.sort_by(sort_by);
        }
        if let Some(sort_dir) = self.sort_dir {
            update = update.sort_dir(sort_dir);
        }
        update
    }
}
