//! Alert rows returned by `/alerts`.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::alert::{Alert, AlertSeverity, AlertStatus};
use crate::domain::types::{PageLimit, PersonRef};
use crate::dto::page::{PageEnvelope, PageResult};
use crate::dto::{DtoResult, opt_string_or_number};

/// Raw alert as produced by the backend. The person reference arrives as
/// either `REF_PERSONNE` or `ref_personne`.
#[derive(Debug, Deserialize)]
pub struct AlertDto {
    #[serde(default, rename = "REF_PERSONNE", deserialize_with = "opt_string_or_number")]
    pub ref_personne_upper: Option<String>,
    #[serde(default, rename = "ref_personne", deserialize_with = "opt_string_or_number")]
    pub ref_personne_lower: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub alert_message: Option<String>,
    #[serde(default)]
    pub alert_severity: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
}

impl AlertDto {
    pub fn into_alert(self) -> DtoResult<Alert> {
        let reference = self
            .ref_personne_upper
            .or(self.ref_personne_lower)
            .unwrap_or_default();

        Ok(Alert {
            ref_personne: PersonRef::new(reference)?,
            alert_type: self.alert_type.unwrap_or_default(),
            alert_message: self.alert_message.unwrap_or_default(),
            severity: self
                .alert_severity
                .map(AlertSeverity::from)
                .unwrap_or_default(),
            product: self.product,
            expiration_date: self.expiration_date,
            days_until_expiry: self.days_until_expiry,
            status: AlertStatus::Open,
        })
    }
}

pub fn decode_alert_page(body: Value, limit: PageLimit) -> DtoResult<PageResult<Alert>> {
    let envelope = PageEnvelope::<AlertDto>::from_value(body)?;
    envelope.try_into_page(limit, AlertDto::into_alert)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reference_is_read_from_either_case() {
        let body = json!({
            "items": [
                { "REF_PERSONNE": 77, "alert_type": "Expiry", "alert_message": "Soon" },
                { "ref_personne": "P-2", "alert_severity": "Low" }
            ]
        });

        let page = decode_alert_page(body, PageLimit::default()).unwrap();

        assert_eq!(page.items[0].ref_personne.as_str(), "77");
        assert_eq!(page.items[1].ref_personne.as_str(), "P-2");
        assert!(!page.has_more);
    }

    #[test]
    fn severity_defaults_to_high_and_text_to_empty() {
        let body = json!({ "items": [{ "ref_personne": "P-1" }] });

        let alert = decode_alert_page(body, PageLimit::default())
            .unwrap()
            .items
            .remove(0);

        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.alert_type, "");
        assert_eq!(alert.alert_message, "");
        assert_eq!(alert.status, AlertStatus::Open);
    }

    #[test]
    fn upper_case_reference_wins_when_both_are_sent() {
        let body = json!({ "items": [{ "REF_PERSONNE": "UP", "ref_personne": "low" }] });

        let page = decode_alert_page(body, PageLimit::default()).unwrap();

        assert_eq!(page.items[0].ref_personne.as_str(), "UP");
    }
}
