use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, contains_folded};
use crate::domain::types::PersonRef;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Alert {
    pub ref_personne: PersonRef,
    pub alert_type: String,
    pub alert_message: String,
    pub severity: AlertSeverity,
    pub product: Option<String>,
    pub expiration_date: Option<String>,
    pub days_until_expiry: Option<i64>,
    /// Local handling state; the backend does not track it.
    pub status: AlertStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum AlertSeverity {
    #[default]
    High,
    Medium,
    Low,
    Other(String),
}

/// Local handling state of an alert row.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Open,
    Resolved,
    Dismissed,
}

/// Partial update applied to an [`Alert`] row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertPatch {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
}

impl AlertPatch {
    #[must_use]
    pub fn status(status: AlertStatus) -> Self {
        Self {
            status: Some(status),
            severity: None,
        }
    }
}

impl Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::High => write!(f, "High"),
            AlertSeverity::Medium => write!(f, "Medium"),
            AlertSeverity::Low => write!(f, "Low"),
            AlertSeverity::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AlertSeverity {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => AlertSeverity::High,
            "medium" => AlertSeverity::Medium,
            "low" => AlertSeverity::Low,
            _ => AlertSeverity::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for AlertSeverity {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<AlertSeverity> for String {
    fn from(value: AlertSeverity) -> Self {
        value.to_string()
    }
}

impl Entity for Alert {
    type Patch = AlertPatch;

    fn key(&self) -> &str {
        self.ref_personne.as_str()
    }

    fn apply_patch(&mut self, patch: &AlertPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(severity) = &patch.severity {
            self.severity = severity.clone();
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.alert_message, needle)
            || contains_folded(self.ref_personne.as_str(), needle)
            || contains_folded(&self.alert_type, needle)
    }

    fn is_visible(&self) -> bool {
        self.status != AlertStatus::Dismissed
    }
}

/// Number of alerts per severity on the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SeverityBreakdown {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityBreakdown {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut acc, alert| {
            acc.total += 1;
            match alert.severity {
                AlertSeverity::High => acc.high += 1,
                AlertSeverity::Medium => acc.medium += 1,
                AlertSeverity::Low => acc.low += 1,
                AlertSeverity::Other(_) => {}
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(reference: &str, severity: AlertSeverity) -> Alert {
        Alert {
            ref_personne: PersonRef::new(reference).unwrap(),
            alert_type: "Contract expiry".to_string(),
            alert_message: "Policy expires soon".to_string(),
            severity,
            product: Some("Auto".to_string()),
            expiration_date: None,
            days_until_expiry: Some(12),
            status: AlertStatus::Open,
        }
    }

    #[test]
    fn severity_parses_known_levels_and_keeps_unknown_ones() {
        assert_eq!(AlertSeverity::from("medium"), AlertSeverity::Medium);
        assert_eq!(AlertSeverity::from(" LOW "), AlertSeverity::Low);
        assert_eq!(
            AlertSeverity::from("Critical"),
            AlertSeverity::Other("Critical".to_string())
        );
        assert_eq!(AlertSeverity::default(), AlertSeverity::High);
    }

    #[test]
    fn dismissed_alerts_are_hidden() {
        let mut a = alert("P1", AlertSeverity::High);
        assert!(a.is_visible());

        a.apply_patch(&AlertPatch::status(AlertStatus::Dismissed));

        assert!(!a.is_visible());
        assert_eq!(a.severity, AlertSeverity::High);
    }

    #[test]
    fn search_covers_message_reference_and_type() {
        let a = alert("P-778", AlertSeverity::Low);

        assert!(a.matches_search("expires"));
        assert!(a.matches_search("p-77"));
        assert!(a.matches_search("contract"));
        assert!(!a.matches_search("claim"));
    }

    #[test]
    fn breakdown_counts_each_severity() {
        let alerts = vec![
            alert("A", AlertSeverity::High),
            alert("B", AlertSeverity::High),
            alert("C", AlertSeverity::Low),
            alert("D", AlertSeverity::Other("Info".to_string())),
        ];

        let breakdown = SeverityBreakdown::from_alerts(&alerts);

        assert_eq!(
            breakdown,
            SeverityBreakdown {
                total: 4,
                high: 2,
                medium: 0,
                low: 1,
            }
        );
    }
}
