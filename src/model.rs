use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour AvailabilityRule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(String);

impl RuleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour le coach propriétaire d'une règle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Portée temporelle d'une règle : tous les jours de la plage (`range`),
/// ou seulement certains jours de la semaine (`periodicity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Range,
    Periodicity,
}

/// Sens d'une règle : ouvre ou ferme du temps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Available,
    Unavailable,
}

/// Règle de disponibilité d'un coach.
///
/// `start_date`/`end_date` sont des dates calendaires, `end_date` incluse.
/// `days_of_week` (0=dimanche..6=samedi) n'a de sens que pour
/// `RuleKind::Periodicity` et reste vide pour `RuleKind::Range`.
/// `start_time >= end_time` décrit un intervalle vide, toléré : la règle
/// ne contribue simplement rien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: RuleId,
    pub owner: OwnerId,
    pub kind: RuleKind,
    pub polarity: Polarity,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityRule {
    /// Crée une règle `range` (tous les jours de la plage).
    pub fn range(
        owner: OwnerId,
        polarity: Polarity,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: RuleId::random(),
            owner,
            kind: RuleKind::Range,
            polarity,
            start_date,
            end_date,
            start_time,
            end_time,
            days_of_week: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Crée une règle `periodicity` (jours de semaine donnés, 0=dimanche).
    pub fn periodicity(
        owner: OwnerId,
        polarity: Polarity,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        days_of_week: Vec<u8>,
    ) -> Self {
        Self {
            id: RuleId::random(),
            owner,
            kind: RuleKind::Periodicity,
            polarity,
            start_date,
            end_date,
            start_time,
            end_time,
            days_of_week,
            created_at: Utc::now(),
        }
    }
}

/// Fenêtre ouverte résolue pour un jour donné, en minutes depuis minuit
/// (`0 <= start_minute < end_minute <= 1440`).
/// Valeur éphémère : recalculée à chaque requête, jamais persistée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResolvedInterval {
    pub start_minute: u16,
    pub end_minute: u16,
}

impl ResolvedInterval {
    pub fn new(start_minute: u16, end_minute: u16) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute - self.start_minute
    }
}

/// Carnet de règles complet
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuleBook {
    pub rules: Vec<AvailabilityRule>,
}

impl RuleBook {
    pub fn find_rule<'a>(&'a self, id: &RuleId) -> Option<&'a AvailabilityRule> {
        self.rules.iter().find(|r| &r.id == id)
    }
    pub fn find_rule_mut(&mut self, id: &RuleId) -> Option<&mut AvailabilityRule> {
        self.rules.iter_mut().find(|r| &r.id == id)
    }
    pub fn rules_for_owner<'a>(&'a self, owner: &OwnerId) -> Vec<&'a AvailabilityRule> {
        self.rules.iter().filter(|r| &r.owner == owner).collect()
    }
    pub fn has_owner(&self, owner: &OwnerId) -> bool {
        self.rules.iter().any(|r| &r.owner == owner)
    }
}
