use crate::profile::ProfileBook;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le carnet de profils depuis un support.
    fn load(&self) -> anyhow::Result<ProfileBook>;
    /// Sauvegarde de manière atomique.
    fn save(&self, book: &ProfileBook) -> anyhow::Result<()>;
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Carnet par défaut (profil `default` actif) si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<ProfileBook> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no profile store yet, using default book");
            return Ok(ProfileBook::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<ProfileBook> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let book: ProfileBook =
            serde_json::from_slice(&data).with_context(|| "parsing profile store")?;
        book.check()?;
        Ok(book)
    }

    fn save(&self, book: &ProfileBook) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(book)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), profiles = book.profiles.len(), "profile store saved");
        Ok(())
    }
}

/// Écrit dans un fichier temporaire voisin puis renomme.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
