//! Filter schemas of the two client lists.

use crate::query::FilterSet;

/// Server-side sort keys accepted by the client lists.
pub const CLIENT_SORT_FIELDS: [&str; 2] = ["score", "ref"];

/// Filters shared in shape by both client lists: a segment and a risk level.
pub trait ClientFilterSet: FilterSet {
    fn from_parts(segment: Option<String>, risk: Option<String>) -> Self;
}

/// Filters of `/clients/morale`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorporateFilters {
    pub segment: Option<String>,
    pub business_risk: Option<String>,
}

/// Filters of `/clients/physique`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndividualFilters {
    pub client_segment: Option<String>,
    pub risk_profile: Option<String>,
}

fn pairs(fields: [(&str, &Option<String>); 2]) -> Vec<(String, String)> {
    fields
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FilterSet for CorporateFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        pairs([
            ("segment", &self.segment),
            ("business_risk", &self.business_risk),
        ])
    }
}

impl ClientFilterSet for CorporateFilters {
    fn from_parts(segment: Option<String>, risk: Option<String>) -> Self {
        Self {
            segment: non_blank(segment),
            business_risk: non_blank(risk),
        }
    }
}

impl FilterSet for IndividualFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        pairs([
            ("client_segment", &self.client_segment),
            ("risk_profile", &self.risk_profile),
        ])
    }
}

impl ClientFilterSet for IndividualFilters {
    fn from_parts(segment: Option<String>, risk: Option<String>) -> Self {
        Self {
            client_segment: non_blank(segment),
            risk_profile: non_blank(risk),
        }
    }
}
