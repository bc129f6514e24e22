#![forbid(unsafe_code)]
//! Dispo — bibliothèque de disponibilités de coachs locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Règles d'ouverture/fermeture, récurrentes ou par plage de dates.
//! - Résolution pure des fenêtres ouvertes d'un jour (union puis
//!   soustraction d'intervalles en minutes).
//! - Dates et heures calendaires naïves ; parsing `HH:MM` aux
//!   frontières uniquement.

pub mod agenda;
pub mod io;
pub mod model;
pub mod resolver;
pub mod storage;
pub mod week;

pub use agenda::{prepare_agenda, AgendaRenderer, DaySheet, TextAgenda};
pub use model::{
    AvailabilityRule, OwnerId, Polarity, ResolvedInterval, RuleBook, RuleId, RuleKind,
};
pub use resolver::{resolve_day, Finding, FindingKind, ResolveError, Resolver};
pub use storage::{JsonStorage, Storage};
pub use week::{
    export_week_json, instantiate_rules, load_week_from_file, OpeningSlot, WeekStore,
    WeekTemplate, WeekTemplateInfo,
};
