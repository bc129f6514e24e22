use crate::model::{AvailabilityRule, OwnerId, Polarity};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Grille hebdomadaire réutilisable d'heures d'ouverture d'un coach.
///
/// Une grille ne référence aucun coach : elle est instanciée en règles
/// `periodicity` pour un propriétaire et une plage de dates donnés.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slots: Vec<OpeningSlot>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl WeekTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            bail!("week template needs a non-empty id and name");
        }
        if self.slots.is_empty() {
            bail!("week template has no slots");
        }
        self.slots.iter().try_for_each(OpeningSlot::validate)
    }
}

/// Créneau hebdomadaire : jours de semaine (0=dimanche) + plage horaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningSlot {
    pub days: Vec<u8>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_polarity")]
    pub polarity: Polarity,
}

fn default_polarity() -> Polarity {
    Polarity::Available
}

impl OpeningSlot {
    fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            bail!("slot has no weekday");
        }
        if let Some(bad) = self.days.iter().find(|d| **d > 6) {
            bail!("slot weekday index out of range (0..=6): {bad}");
        }
        if self.start_time == self.end_time {
            bail!("slot opens and closes at the same time");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct WeekTemplateInfo {
    pub template: WeekTemplate,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Gestion simple des grilles persistées sur disque.
#[derive(Debug, Clone)]
pub struct WeekStore {
    base_dir: PathBuf,
}

impl WeekStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    pub fn save(&self, template: &WeekTemplate) -> Result<PathBuf> {
        template.validate()?;
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating week directory {}", self.base_dir.display()))?;
        let path = self.path_for(&template.id);
        fs::write(&path, serde_json::to_string_pretty(template)?)
            .with_context(|| format!("writing week template {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<WeekTemplate> {
        let path = self.path_for(id);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading week template {}", path.display()))?;
        let template: WeekTemplate = serde_json::from_str(&raw)
            .with_context(|| format!("parsing week template {}", path.display()))?;
        template.validate()?;
        Ok(template)
    }

    /// Liste les grilles du répertoire, triées par identifiant. Les
    /// fichiers illisibles sont ignorés avec un avertissement.
    pub fn list(&self) -> Result<Vec<WeekTemplateInfo>> {
        let Ok(entries) = fs::read_dir(&self.base_dir) else {
            return Ok(Vec::new());
        };
        let mut infos = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|raw| serde_json::from_str::<WeekTemplate>(&raw).map_err(Into::into))
            {
                Ok(template) => {
                    let modified = entry
                        .metadata()
                        .and_then(|meta| meta.modified())
                        .ok()
                        .map(DateTime::<Utc>::from);
                    infos.push(WeekTemplateInfo {
                        template,
                        path,
                        modified,
                    });
                }
                Err(err) => {
                    eprintln!("Warning: skipping week template {}: {err}", path.display());
                }
            }
        }
        infos.sort_by_key(|info| info.template.id.clone());
        Ok(infos)
    }
}

/// Instancie une grille en règles `periodicity` pour un coach et une
/// plage de dates (bornes incluses).
pub fn instantiate_rules(
    template: &WeekTemplate,
    owner: &OwnerId,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<AvailabilityRule>> {
    template.validate()?;
    if to < from {
        bail!("inverted date range: {to} is before {from}");
    }

    let mut rules = Vec::with_capacity(template.slots.len());
    for slot in &template.slots {
        rules.push(AvailabilityRule::periodicity(
            owner.clone(),
            slot.polarity,
            from,
            to,
            slot.start_time,
            slot.end_time,
            slot.days.clone(),
        ));
    }
    Ok(rules)
}

pub fn export_week_json<P: AsRef<Path>>(path: P, template: &WeekTemplate) -> Result<()> {
    fs::write(path.as_ref(), serde_json::to_string_pretty(template)?)
        .with_context(|| format!("writing week template {}", path.as_ref().display()))
}

pub fn load_week_from_file<P: AsRef<Path>>(path: P) -> Result<WeekTemplate> {
    let raw = fs::read_to_string(path.as_ref())
        .with_context(|| format!("reading week template {}", path.as_ref().display()))?;
    let template: WeekTemplate = serde_json::from_str(&raw)
        .with_context(|| format!("parsing week template {}", path.as_ref().display()))?;
    template.validate()?;
    Ok(template)
}
