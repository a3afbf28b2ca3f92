//! Save/load of age state.
//!
//! Each manager is stored as its five counters; the owning civilization is
//! rebuilt around it on load, nothing else needs rebinding.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::simulation::{AgeManager, GameSpeed, Nation, NationCivState};

pub const SAVE_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u8,
    pub turn: u64,
    pub speed: GameSpeed,
    pub ages: HashMap<Nation, AgeManager>,
    pub civ_state: HashMap<Nation, NationCivState>,
}

impl SaveGame {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize save game")
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let save: SaveGame = serde_json::from_str(raw).context("failed to parse save game")?;
        if save.version != SAVE_VERSION {
            bail!(
                "unsupported save version {} (expected {})",
                save.version,
                SAVE_VERSION
            );
        }
        Ok(save)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write save {}", path.display()))
    }

    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read save {}", path.display()))?;
        Self::from_json(&raw)
    }
}
