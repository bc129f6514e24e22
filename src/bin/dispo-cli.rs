#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dispo::{
    agenda::{prepare_agenda, TextAgenda},
    io,
    model::{OwnerId, Polarity, RuleId, RuleKind},
    resolver::{FindingKind, Resolver},
    storage::{JsonStorage, Storage},
    week,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de disponibilités de coachs (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du carnet de règles
    #[arg(long, global = true, default_value = "rules.json")]
    rules: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une règle de disponibilité
    AddRule {
        #[arg(long)]
        owner: String,
        /// `range` ou `periodicity`
        #[arg(long)]
        kind: String,
        /// `available` ou `unavailable`
        #[arg(long)]
        polarity: String,
        /// Date de début, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Date de fin (incluse), YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// Heure de début, HH:MM
        #[arg(long)]
        start: String,
        /// Heure de fin, HH:MM
        #[arg(long)]
        end: String,
        /// Jours de semaine "0;1;..;6" (0=dimanche), requis pour `periodicity`
        #[arg(long)]
        days: Option<String>,
    },

    /// Supprimer une règle par identifiant
    RemoveRule {
        #[arg(long)]
        id: String,
    },

    /// Importer des règles depuis un CSV
    ImportRules {
        #[arg(long)]
        csv: String,
    },

    /// Lister les règles et optionnellement exporter
    List {
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Résoudre les fenêtres ouvertes d'un coach pour un jour (ou une plage)
    Resolve {
        #[arg(long)]
        owner: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Fin de plage (incluse), YYYY-MM-DD
        #[arg(long)]
        until: Option<String>,
        /// Export CSV des fenêtres (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Générer la feuille de jour texte d'un coach
    Agenda {
        #[arg(long)]
        owner: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },

    /// Vérifier la cohérence du carnet de règles
    Check {
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Instancier une grille hebdomadaire en règles pour un coach
    ApplyWeek {
        /// Fichier JSON de la grille
        #[arg(long)]
        template: String,
        #[arg(long)]
        owner: String,
        /// Date de début, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Date de fin (incluse), YYYY-MM-DD
        #[arg(long)]
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.rules)?;
    let mut resolver = Resolver::new();
    *resolver.book_mut() = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddRule {
            owner,
            kind,
            polarity,
            from,
            to,
            start,
            end,
            days,
        } => {
            let owner = OwnerId::new(owner);
            let kind = io::parse_kind(&kind)?;
            let polarity = io::parse_polarity(&polarity)?;
            let from = io::parse_date(&from)?;
            let to = io::parse_date(&to)?;
            let start = io::parse_time(&start)?;
            let end = io::parse_time(&end)?;

            let rule = match kind {
                RuleKind::Range => {
                    dispo::AvailabilityRule::range(owner, polarity, from, to, start, end)
                }
                RuleKind::Periodicity => {
                    let Some(days) = days else {
                        bail!("--days is required for a periodicity rule");
                    };
                    let days = io::parse_days(&days)?;
                    dispo::AvailabilityRule::periodicity(
                        owner, polarity, from, to, start, end, days,
                    )
                }
            };
            let id = resolver.add_rule(rule);
            storage.save(resolver.book())?;
            println!("{}", id.as_str());
            0
        }
        Commands::RemoveRule { id } => {
            resolver.remove_rule(&RuleId::new(id))?;
            storage.save(resolver.book())?;
            0
        }
        Commands::ImportRules { csv } => {
            let rules = io::import_rules_csv(csv)?;
            resolver.book_mut().rules.extend(rules);
            storage.save(resolver.book())?;
            0
        }
        Commands::List { owner, out_json } => {
            if let Some(path) = out_json {
                io::export_rules_json(path, resolver.book())?;
            }
            let rules: Vec<&dispo::AvailabilityRule> = match &owner {
                Some(filter) => resolver.book().rules_for_owner(&OwnerId::new(filter)),
                None => resolver.book().rules.iter().collect(),
            };
            // impression compacte
            for r in rules {
                let kind = match r.kind {
                    RuleKind::Range => "range",
                    RuleKind::Periodicity => "periodicity",
                };
                let polarity = match r.polarity {
                    Polarity::Available => "available",
                    Polarity::Unavailable => "unavailable",
                };
                println!(
                    "{} | {} | {} {} | {} → {} | {} → {}",
                    r.id.as_str(),
                    r.owner.as_str(),
                    kind,
                    polarity,
                    r.start_date.format("%Y-%m-%d"),
                    r.end_date.format("%Y-%m-%d"),
                    r.start_time.format("%H:%M"),
                    r.end_time.format("%H:%M"),
                );
            }
            0
        }
        Commands::Resolve {
            owner,
            date,
            until,
            out_csv,
        } => {
            let owner = OwnerId::new(owner);
            let from = io::parse_date(&date)?;
            let to = match until {
                Some(raw) => io::parse_date(&raw)?,
                None => from,
            };
            let days = resolver.resolve_span(&owner, from, to)?;
            if let Some(path) = out_csv {
                io::export_windows_csv(path, &owner, &days)?;
            }
            for (day, windows) in &days {
                if windows.is_empty() {
                    println!("{} | (aucune fenêtre ouverte)", day.format("%Y-%m-%d"));
                    continue;
                }
                for win in windows {
                    println!(
                        "{} | {}",
                        day.format("%Y-%m-%d"),
                        dispo::agenda::format_window(win)
                    );
                }
            }
            0
        }
        Commands::Agenda { owner, date, out } => {
            let date = io::parse_date(&date)?;
            let renderer = TextAgenda;
            let sheet = prepare_agenda(resolver.book(), &owner, date, &renderer)?;
            std::fs::write(&out, &sheet.content)?;
            println!(
                "Agenda generated for {} ({} window(s) on {})",
                sheet.owner.as_str(),
                sheet.windows.len(),
                sheet.date.format("%Y-%m-%d")
            );
            0
        }
        Commands::Check { report } => {
            let findings = resolver.audit();
            if findings.is_empty() {
                println!("OK: no findings");
                0
            } else {
                eprintln!("Found {} finding(s)", findings.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["rule_id", "kind"])?;
                    for f in &findings {
                        w.write_record([
                            f.rule.as_str(),
                            match f.kind {
                                FindingKind::EmptyTimeRange => "empty-time-range",
                                FindingKind::UnmatchableDateRange => "unmatchable-date-range",
                                FindingKind::StrayDaysOfWeek => "stray-days-of-week",
                                FindingKind::MissingDaysOfWeek => "missing-days-of-week",
                                FindingKind::InvalidWeekday => "invalid-weekday",
                                FindingKind::ShadowedRule => "shadowed-rule",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::ApplyWeek {
            template,
            owner,
            from,
            to,
        } => {
            let template = week::load_week_from_file(&template)?;
            let owner = OwnerId::new(owner);
            let from = io::parse_date(&from)?;
            let to = io::parse_date(&to)?;
            let rules = week::instantiate_rules(&template, &owner, from, to)?;
            let count = rules.len();
            resolver.book_mut().rules.extend(rules);
            storage.save(resolver.book())?;
            println!(
                "Applied {} slot(s) from template {} to {}",
                count,
                template.id,
                owner.as_str()
            );
            0
        }
    };

    std::process::exit(code);
}
