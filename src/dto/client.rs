//! Client rows returned by `/clients/morale` and `/clients/physique`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::client::{Client, ClientKind};
use crate::domain::types::{PageLimit, PersonRef};
use crate::dto::page::{PageEnvelope, PageResult};
use crate::dto::{DtoResult, opt_string_or_number, string_or_number};

#[derive(Debug, Deserialize)]
pub struct ClientDto {
    #[serde(deserialize_with = "string_or_number")]
    pub ref_personne: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub segment: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub risk: Option<String>,
    #[serde(default, rename = "lastContact", alias = "last_contact")]
    pub last_contact: Option<String>,
    /// Every other attribute, kept verbatim. The backend's own `type` tag is dropped.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientDto {
    pub fn into_client(mut self, kind: ClientKind) -> DtoResult<Client> {
        self.extra.remove("type");
        Ok(Client {
            ref_personne: PersonRef::new(self.ref_personne)?,
            kind,
            name: self.name,
            score: self.score,
            segment: self.segment,
            risk: self.risk,
            last_contact: self.last_contact,
            extra: self.extra,
        })
    }
}

/// Decodes a `{ items, has_more? }` body into typed clients of the given kind.
pub fn decode_client_page(
    body: Value,
    kind: ClientKind,
    limit: PageLimit,
) -> DtoResult<PageResult<Client>> {
    let envelope = PageEnvelope::<ClientDto>::from_value(body)?;
    envelope.try_into_page(limit, |dto| dto.into_client(kind))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dto::DtoError;

    #[test]
    fn decodes_numeric_reference_and_keeps_unknown_fields() {
        let body = json!({
            "items": [
                { "ref_personne": 1042, "name": "Acme", "score": 88.5, "type": "x", "city": "Lyon" }
            ],
            "has_more": true
        });

        let page = decode_client_page(body, ClientKind::Moral, PageLimit::default()).unwrap();

        assert!(page.has_more);
        let client = &page.items[0];
        assert_eq!(client.ref_personne.as_str(), "1042");
        assert_eq!(client.kind, ClientKind::Moral);
        assert_eq!(client.score, Some(88.5));
        assert_eq!(client.extra.get("city"), Some(&json!("Lyon")));
        assert!(!client.extra.contains_key("type"));
    }

    #[test]
    fn blank_reference_is_a_decode_error() {
        let body = json!({ "items": [{ "ref_personne": "  " }] });

        let result = decode_client_page(body, ClientKind::Physique, PageLimit::default());

        assert!(matches!(result, Err(DtoError::Constraint(_))));
    }

    #[test]
    fn missing_reference_is_a_decode_error() {
        let body = json!({ "items": [{ "name": "No ref" }] });

        let result = decode_client_page(body, ClientKind::Physique, PageLimit::default());

        assert!(matches!(result, Err(DtoError::Shape(_))));
    }
}
