mod audit;
mod day;
mod select;
mod types;
mod util;

pub use types::{Finding, FindingKind, ResolveError};

use crate::model::{AvailabilityRule, OwnerId, ResolvedInterval, RuleBook, RuleId};
use anyhow::Context;
use chrono::NaiveDate;

/// Fenêtres ouvertes d'un coach pour un jour donné, triées par début.
///
/// Fonction pure, sans état : la liste de règles peut être le carnet
/// complet non filtré, la sélection par propriétaire est faite ici.
pub fn resolve_day(
    rules: &[AvailabilityRule],
    owner: &OwnerId,
    date: NaiveDate,
) -> Vec<ResolvedInterval> {
    day::resolve_day(rules, owner, date)
}

/// Resolver : encapsule un RuleBook en cours d'édition
#[derive(Debug, Default)]
pub struct Resolver {
    book: RuleBook,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            book: RuleBook::default(),
        }
    }

    pub fn book(&self) -> &RuleBook {
        &self.book
    }
    pub fn book_mut(&mut self) -> &mut RuleBook {
        &mut self.book
    }

    /// Ajoute une règle au carnet et retourne son identifiant.
    pub fn add_rule(&mut self, rule: AvailabilityRule) -> RuleId {
        let id = rule.id.clone();
        self.book.rules.push(rule);
        id
    }

    pub fn remove_rule(&mut self, id: &RuleId) -> Result<(), ResolveError> {
        let Some(pos) = self.book.rules.iter().position(|r| &r.id == id) else {
            return Err(ResolveError::UnknownRule(id.as_str().to_string()));
        };
        self.book.rules.remove(pos);
        Ok(())
    }

    pub fn resolve_day(&self, owner: &OwnerId, date: NaiveDate) -> Vec<ResolvedInterval> {
        day::resolve_day(&self.book.rules, owner, date)
    }

    /// Résout chaque jour de `[from, to]` inclus (vue mois du calendrier).
    pub fn resolve_span(
        &self,
        owner: &OwnerId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, Vec<ResolvedInterval>)>, ResolveError> {
        if to < from {
            return Err(ResolveError::InvalidDateRange);
        }
        let mut out = Vec::new();
        let mut current = from;
        while current <= to {
            out.push((current, day::resolve_day(&self.book.rules, owner, current)));
            current = current.succ_opt().context("date overflow")?;
        }
        Ok(out)
    }

    pub fn audit(&self) -> Vec<Finding> {
        audit::audit_rules(&self.book)
    }
}
