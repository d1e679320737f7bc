//! Adventure snapshots for save/load.
//!
//! The engine only works on in-memory state; these helpers sit at the
//! boundary and are never called in the middle of a turn.

use crate::battle::Battle;
use crate::character::Character;
use crate::dungeon::DungeonLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save does not contain a hero")]
    NotAHero,

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save file version.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume an adventure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAdventure {
    pub version: u32,

    /// Seconds since the Unix epoch.
    pub saved_at: String,

    pub hero: Character,

    /// The battle in progress, if the hero was mid-fight.
    #[serde(default)]
    pub battle: Option<Battle>,

    /// The level being explored, if any.
    #[serde(default)]
    pub level: Option<DungeonLevel>,

    pub metadata: SaveMetadata,
}

/// Summary fields readable without loading the whole save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub hero_name: String,
    pub class: String,
    pub level: u8,
    pub day: u32,
    pub saved_at: String,
}

impl SavedAdventure {
    pub fn new(
        hero: Character,
        battle: Option<Battle>,
        level: Option<DungeonLevel>,
    ) -> Result<Self, PersistError> {
        let data = hero.hero().ok_or(PersistError::NotAHero)?;
        let saved_at = timestamp();
        let metadata = SaveMetadata {
            hero_name: hero.name.clone(),
            class: data.class.to_string(),
            level: hero.level,
            day: data.day,
            saved_at: saved_at.clone(),
        };

        Ok(Self {
            version: SAVE_VERSION,
            saved_at,
            hero,
            battle,
            level,
            metadata,
        })
    }

    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).await?;
        tracing::debug!(path = %path.as_ref().display(), hero = %self.hero.name, "adventure saved");
        Ok(())
    }

    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;
        check_version(saved.version)?;
        Ok(saved)
    }

    /// Read only the metadata of a save file.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<SaveMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: SaveMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;
        check_version(partial.version)?;
        Ok(partial.metadata)
    }
}

fn check_version(found: u32) -> Result<(), PersistError> {
    if found != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

/// A save file found on disk.
#[derive(Debug, Clone)]
pub struct SaveInfo {
    pub path: PathBuf,
    pub metadata: SaveMetadata,
}

/// List readable saves in `dir`, sorted by hero name.
///
/// Files that aren't saves (or are from another version) are skipped. A
/// missing directory lists as empty.
pub async fn list_saves(dir: impl AsRef<Path>) -> Result<Vec<SaveInfo>, PersistError> {
    let dir = dir.as_ref();
    let mut saves = Vec::new();
    if !fs::try_exists(dir).await? {
        return Ok(saves);
    }

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            match SavedAdventure::peek_metadata(&path).await {
                Ok(metadata) => saves.push(SaveInfo { path, metadata }),
                Err(err) => tracing::debug!(path = %path.display(), error = %err, "skipping file"),
            }
        }
    }

    saves.sort_by(|a, b| a.metadata.hero_name.cmp(&b.metadata.hero_name));
    Ok(saves)
}

/// File name for a hero's save, with anything but letters and digits replaced.
pub fn save_path(dir: impl AsRef<Path>, hero_name: &str) -> PathBuf {
    let sanitized = hero_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    dir.as_ref().join(format!("{sanitized}.json"))
}

fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs().to_string()
}
