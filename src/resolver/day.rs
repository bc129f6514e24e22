use super::{select, util};
use crate::model::{AvailabilityRule, OwnerId, Polarity, ResolvedInterval};
use chrono::NaiveDate;

/// Calcule les fenêtres ouvertes d'un coach pour un jour donné.
///
/// Fonction pure : aucune E/S, aucune mutation des règles en entrée.
/// La liste `rules` peut être le carnet complet, non filtré ; la
/// sélection par propriétaire et par date est faite ici.
pub(super) fn resolve_day(
    rules: &[AvailabilityRule],
    owner: &OwnerId,
    date: NaiveDate,
) -> Vec<ResolvedInterval> {
    let mut available: Vec<&AvailabilityRule> = Vec::new();
    let mut unavailable: Vec<&AvailabilityRule> = Vec::new();

    for rule in rules {
        if !select::applies_on(rule, owner, date) {
            continue;
        }
        match rule.polarity {
            Polarity::Available => available.push(rule),
            Polarity::Unavailable => unavailable.push(rule),
        }
    }

    // Sans règle d'ouverture, les indisponibilités seules ne créent
    // jamais de temps ouvert.
    if available.is_empty() {
        return Vec::new();
    }

    // Multiensemble : les fenêtres ouvertes qui se chevauchent ne sont
    // pas fusionnées avant soustraction.
    let mut working: Vec<ResolvedInterval> = available
        .iter()
        .filter_map(|r| util::rule_span(r))
        .map(|(s, e)| ResolvedInterval::new(s, e))
        .collect();

    // Soustraction règle par règle, chaque passe opérant sur la sortie
    // de la précédente.
    for rule in &unavailable {
        let Some((u_start, u_end)) = util::rule_span(rule) else {
            continue;
        };
        working = util::subtract_span(working, u_start, u_end);
    }

    working.sort_by_key(|w| w.start_minute);
    working
}
