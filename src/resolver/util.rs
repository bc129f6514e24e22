use crate::model::{AvailabilityRule, ResolvedInterval};
use chrono::{NaiveTime, Timelike};

pub(super) fn minute_of(t: NaiveTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// Intervalle en minutes d'une règle, ou `None` si l'intervalle est vide
/// (`start_time >= end_time`).
pub(super) fn rule_span(rule: &AvailabilityRule) -> Option<(u16, u16)> {
    let start = minute_of(rule.start_time);
    let end = minute_of(rule.end_time);
    if start < end {
        Some((start, end))
    } else {
        None
    }
}

/// Retire `[u_start, u_end)` de chaque fenêtre de la liste de travail.
///
/// Découpe/rognage, pas de différence d'intervalles générique : les gardes
/// strictes `<`/`>` garantissent qu'aucune fenêtre de longueur nulle ne
/// sort quand les bornes coïncident. Une fenêtre entièrement couverte
/// disparaît.
pub(super) fn subtract_span(
    working: Vec<ResolvedInterval>,
    u_start: u16,
    u_end: u16,
) -> Vec<ResolvedInterval> {
    let mut out = Vec::with_capacity(working.len());
    for w in working {
        if w.end_minute <= u_start || w.start_minute >= u_end {
            out.push(w);
            continue;
        }
        if w.start_minute < u_start {
            out.push(ResolvedInterval::new(w.start_minute, u_start));
        }
        if w.end_minute > u_end {
            out.push(ResolvedInterval::new(u_end, w.end_minute));
        }
    }
    out
}
