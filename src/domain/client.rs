use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entity::{Entity, contains_folded, option_contains_folded};
use crate::domain::types::PersonRef;

/// Channel recorded when an operator messages a client from the table.
pub const CONTACT_CHANNEL_WHATSAPP: &str = "whatsapp";

/// Score above which a client counts towards the "high score" statistic.
pub const HIGH_SCORE_THRESHOLD: f64 = 70.0;

/// Legal form of a client, selecting which list it belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Corporate client (`personne morale`).
    Moral,
    /// Individual client (`personne physique`).
    Physique,
}

impl Display for ClientKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientKind::Moral => write!(f, "moral"),
            ClientKind::Physique => write!(f, "physique"),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Client {
    pub ref_personne: PersonRef,
    pub kind: ClientKind,
    pub name: Option<String>,
    pub score: Option<f64>,
    pub segment: Option<String>,
    pub risk: Option<String>,
    /// Last channel used to reach the client, if any.
    pub last_contact: Option<String>,
    /// Attributes sent by the backend that the dashboard does not model.
    pub extra: Map<String, Value>,
}

/// Partial update applied to a [`Client`] row. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub score: Option<f64>,
    pub segment: Option<String>,
    pub risk: Option<String>,
    pub last_contact: Option<String>,
}

impl ClientPatch {
    /// Patch recording that the client was contacted through `channel`.
    #[must_use]
    pub fn contacted_via(channel: impl Into<String>) -> Self {
        Self {
            last_contact: Some(channel.into()),
            ..Self::default()
        }
    }
}

impl Entity for Client {
    type Patch = ClientPatch;

    fn key(&self) -> &str {
        self.ref_personne.as_str()
    }

    fn apply_patch(&mut self, patch: &ClientPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(score) = patch.score {
            self.score = Some(score);
        }
        if let Some(segment) = &patch.segment {
            self.segment = Some(segment.clone());
        }
        if let Some(risk) = &patch.risk {
            self.risk = Some(risk.clone());
        }
        if let Some(last_contact) = &patch.last_contact {
            self.last_contact = Some(last_contact.clone());
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        option_contains_folded(self.name.as_deref(), needle)
            || contains_folded(self.ref_personne.as_str(), needle)
    }
}

/// Coarse bucket used to colour a client's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
    Unscored,
}

impl ScoreBand {
    /// A zero or missing score is reported as [`ScoreBand::Unscored`].
    pub fn of(score: Option<f64>) -> Self {
        match score {
            None => ScoreBand::Unscored,
            Some(s) if s == 0.0 || s.is_nan() => ScoreBand::Unscored,
            Some(s) if s >= 80.0 => ScoreBand::High,
            Some(s) if s >= 60.0 => ScoreBand::Medium,
            Some(_) => ScoreBand::Low,
        }
    }
}

/// Summary figures shown above a client table for the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClientStats {
    pub active: usize,
    pub high_score: usize,
    pub average_score: i64,
}

impl ClientStats {
    pub fn from_clients(clients: &[Client]) -> Self {
        if clients.is_empty() {
            return Self::default();
        }

        let high_score = clients
            .iter()
            .filter(|c| c.score.is_some_and(|s| s > HIGH_SCORE_THRESHOLD))
            .count();
        let total: f64 = clients.iter().map(|c| c.score.unwrap_or(0.0)).sum();
        let average = total / clients.len() as f64;

        Self {
            active: clients.len(),
            high_score,
            average_score: if average.is_finite() {
                average.round() as i64
            } else {
                0
            },
        }
    }
}
