use super::{util, Finding, FindingKind};
use crate::model::{Polarity, RuleBook, RuleKind};

pub(super) fn audit_rules(book: &RuleBook) -> Vec<Finding> {
    let mut out = Vec::new();

    for rule in book.rules.iter() {
        if util::rule_span(rule).is_none() {
            out.push(Finding {
                rule: rule.id.clone(),
                kind: FindingKind::EmptyTimeRange,
            });
        }
        if rule.end_date < rule.start_date {
            out.push(Finding {
                rule: rule.id.clone(),
                kind: FindingKind::UnmatchableDateRange,
            });
        }
        match rule.kind {
            RuleKind::Range if !rule.days_of_week.is_empty() => {
                out.push(Finding {
                    rule: rule.id.clone(),
                    kind: FindingKind::StrayDaysOfWeek,
                });
            }
            RuleKind::Periodicity if rule.days_of_week.is_empty() => {
                out.push(Finding {
                    rule: rule.id.clone(),
                    kind: FindingKind::MissingDaysOfWeek,
                });
            }
            _ => {}
        }
        if rule.days_of_week.iter().any(|d| *d > 6) {
            out.push(Finding {
                rule: rule.id.clone(),
                kind: FindingKind::InvalidWeekday,
            });
        }
    }

    // Règle d'ouverture totalement masquée par une seule règle de
    // fermeture `range` couvrant ses dates et son créneau horaire.
    for a in book.rules.iter() {
        if a.polarity != Polarity::Available {
            continue;
        }
        let Some((a_start, a_end)) = util::rule_span(a) else {
            continue;
        };
        if a.end_date < a.start_date {
            continue;
        }
        let shadowed = book.rules.iter().any(|u| {
            if u.polarity != Polarity::Unavailable
                || u.kind != RuleKind::Range
                || u.owner != a.owner
            {
                return false;
            }
            let Some((u_start, u_end)) = util::rule_span(u) else {
                return false;
            };
            u.start_date <= a.start_date
                && u.end_date >= a.end_date
                && u_start <= a_start
                && u_end >= a_end
        });
        if shadowed {
            out.push(Finding {
                rule: a.id.clone(),
                kind: FindingKind::ShadowedRule,
            });
        }
    }

    out
}
