use crate::model::RuleBook;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un carnet de règles depuis un support.
    fn load(&self) -> anyhow::Result<RuleBook>;
    /// Sauvegarde de manière atomique.
    fn save(&self, book: &RuleBook) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Charge le carnet, ou un carnet vide si le fichier n'existe pas
    /// encore (premier lancement).
    pub fn load_or_default(&self) -> anyhow::Result<RuleBook> {
        if !self.path.exists() {
            return Ok(RuleBook::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<RuleBook> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let book: RuleBook =
            serde_json::from_slice(&data).with_context(|| "parsing rule book")?;
        Ok(book)
    }

    fn save(&self, book: &RuleBook) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
