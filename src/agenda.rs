use crate::model::{OwnerId, ResolvedInterval, RuleBook};
use crate::resolver;
use anyhow::{bail, Result};
use chrono::NaiveDate;

/// Formate des minutes-depuis-minuit en étiquette `H:MM`
/// (heures sans zéro de tête, minutes sur deux chiffres).
pub fn format_minute(minute: u16) -> String {
    let mut hours = itoa::Buffer::new();
    let mut mins = itoa::Buffer::new();
    let m = minute % 60;
    let mut out = String::with_capacity(5);
    out.push_str(hours.format(minute / 60));
    out.push(':');
    if m < 10 {
        out.push('0');
    }
    out.push_str(mins.format(m));
    out
}

/// Étiquette d'une fenêtre, ex. `9:00 → 12:00`.
pub fn format_window(window: &ResolvedInterval) -> String {
    format!(
        "{} → {}",
        format_minute(window.start_minute),
        format_minute(window.end_minute)
    )
}

/// Feuille de jour générée pour un coach.
#[derive(Debug, Clone)]
pub struct DaySheet {
    pub owner: OwnerId,
    pub date: NaiveDate,
    pub windows: Vec<ResolvedInterval>,
    pub content: String,
}

/// Permet de customiser le rendu de la feuille (texte, mail, etc.).
pub trait AgendaRenderer {
    fn render(&self, owner: &OwnerId, date: NaiveDate, windows: &[ResolvedInterval]) -> String;
}

/// Gabarit texte simple destiné à un futur mail/affichage.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAgenda;

impl AgendaRenderer for TextAgenda {
    fn render(&self, owner: &OwnerId, date: NaiveDate, windows: &[ResolvedInterval]) -> String {
        if windows.is_empty() {
            return format!(
                "Aucun créneau ouvert le {date} pour le coach \"{owner}\".\n",
                date = date.format("%Y-%m-%d"),
                owner = owner.as_str()
            );
        }
        let mut out = format!(
            "Créneaux ouverts le {date} pour le coach \"{owner}\" :\n",
            date = date.format("%Y-%m-%d"),
            owner = owner.as_str()
        );
        for win in windows {
            out.push_str("  - ");
            out.push_str(&format_window(win));
            out.push('\n');
        }
        out
    }
}

/// Prépare la feuille de jour d'un coach pour une date donnée.
pub fn prepare_agenda(
    book: &RuleBook,
    owner: &str,
    date: NaiveDate,
    renderer: &dyn AgendaRenderer,
) -> Result<DaySheet> {
    let owner = OwnerId::new(owner);
    if !book.has_owner(&owner) {
        bail!("unknown owner: {}", owner.as_str());
    }

    let windows = resolver::resolve_day(&book.rules, &owner, date);
    let content = renderer.render(&owner, date, &windows);
    Ok(DaySheet {
        owner,
        date,
        windows,
        content,
    })
}
