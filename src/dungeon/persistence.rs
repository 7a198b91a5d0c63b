use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};
use super::{DungeonGrid, Room};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonMetadata {
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Present when the dungeon came from a seeded rng.
    pub seed: Option<u64>,
    pub version: String,
}

/// A generated dungeon as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDungeon {
    pub metadata: DungeonMetadata,
    pub grid: DungeonGrid,
    pub rooms: Vec<Room>,
}

impl SavedDungeon {
    pub fn new(grid: DungeonGrid, rooms: Vec<Room>, seed: Option<u64>) -> Self {
        Self {
            metadata: DungeonMetadata {
                created_at: chrono::Utc::now(),
                seed,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            grid,
            rooms,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize dungeon")?;

        // Write to a temporary file first so a crash never leaves half a dungeon.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write dungeon to {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename {} to {}", temp_path.display(), path.display()))?;

        tracing::info!(path = %path.display(), "saved dungeon");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dungeon from {}", path.display()))?;

        let saved: SavedDungeon = serde_json::from_str(&content)
            .with_context(|| "Failed to parse dungeon JSON")?;

        if !saved.grid.is_well_formed() {
            bail!(
                "Dungeon in {} does not match its recorded {}x{} size",
                path.display(),
                saved.grid.width(),
                saved.grid.height()
            );
        }

        Ok(saved)
    }
}
