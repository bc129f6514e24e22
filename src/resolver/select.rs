use crate::model::{AvailabilityRule, OwnerId, RuleKind};
use chrono::{Datelike, NaiveDate};

/// Une règle candidate s'applique-t-elle à ce coach et ce jour ?
///
/// Comparaison de dates calendaires pures : `end_date` incluse, aucune
/// composante horaire à normaliser. Pour `periodicity`, le jour de
/// semaine (0=dimanche..6=samedi) doit figurer dans `days_of_week` ;
/// `days_of_week` n'est jamais consulté pour une règle `range`.
pub(super) fn applies_on(rule: &AvailabilityRule, owner: &OwnerId, date: NaiveDate) -> bool {
    if &rule.owner != owner {
        return false;
    }
    if date < rule.start_date || date > rule.end_date {
        return false;
    }
    match rule.kind {
        RuleKind::Range => true,
        RuleKind::Periodicity => {
            let weekday = date.weekday().num_days_from_sunday();
            rule.days_of_week.iter().any(|d| u32::from(*d) == weekday)
        }
    }
}
