//! Save record, JSON codec, and the stores that hold it.
//!
//! The record carries plain values only. Everything derived from them (max
//! HP, boss mode, time bonus, DPS) is recomputed on load from the current
//! tables rather than trusted from disk.

use crate::core::constants::{SAVE_KEY, SAVE_VERSION_MAGIC};
use crate::core::encounter::Encounter;
use crate::core::game_state::{new_player_id, GameState, GameStats};
use crate::data::GameData;
use crate::items::Inventory;
use crate::utils::persistence::save_path;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    pub gold: f64,
    pub level: u32,
    pub click_damage: u32,
    pub inventory: Inventory,
    pub artifacts_inventory: Inventory,
    pub current_hp: f64,
    /// Informational; recomputed from `level` on load.
    pub max_hp: f64,
    pub time_left: f64,
    /// Informational; recomputed from `level` on load.
    pub is_boss: bool,
    pub soul_gems: u64,
    pub stats: GameStats,
    /// Unix seconds.
    pub last_save_time: i64,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            gold: 0.0,
            level: 1,
            click_damage: 1,
            inventory: Inventory::new(),
            artifacts_inventory: Inventory::new(),
            current_hp: 0.0,
            max_hp: 0.0,
            time_left: 0.0,
            is_boss: false,
            soul_gems: 0,
            stats: GameStats::default(),
            last_save_time: 0,
        }
    }
}

impl SaveRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            gold: state.gold,
            level: state.level(),
            click_damage: state.click_damage,
            inventory: state.inventory.clone(),
            artifacts_inventory: state.artifacts.clone(),
            current_hp: state.encounter.current_hp,
            max_hp: state.encounter.max_hp,
            time_left: state.encounter.time_left,
            is_boss: state.encounter.is_boss,
            soul_gems: state.soul_gems,
            stats: state.stats.clone(),
            last_save_time: state.last_save_time,
        }
    }

    /// Rebuilds a consistent [`GameState`] from this record.
    ///
    /// Level and click damage are floored at 1; invalid gold becomes 0. The
    /// encounter is restarted from the current formulas with a freshly
    /// computed time bonus, then a saved HP inside `(0, maxHp]` and a saved
    /// positive timer are resumed. A missing player id is assigned here.
    pub fn restore_state(self, data: &GameData) -> GameState {
        let level = self.level.max(1);
        let gold = if self.gold.is_finite() && self.gold > 0.0 {
            self.gold
        } else {
            0.0
        };

        let mut stats = self.stats;
        if stats.player_id.is_empty() {
            stats.player_id = new_player_id();
        }
        stats.max_level = stats.max_level.max(level);

        let mut state = GameState {
            gold,
            click_damage: self.click_damage.max(1),
            inventory: self.inventory,
            artifacts: self.artifacts_inventory,
            soul_gems: self.soul_gems,
            encounter: Encounter::start(level, 0.0),
            stats,
            last_save_time: self.last_save_time,
        };
        state.start_encounter(data, level);

        let enc = &mut state.encounter;
        if self.current_hp.is_finite() && self.current_hp > 0.0 && self.current_hp <= enc.max_hp {
            enc.current_hp = self.current_hp;
        }
        if self.time_left.is_finite() && self.time_left > 0.0 {
            enc.time_left = self.time_left;
            enc.max_time = enc.max_time.max(self.time_left);
        }
        state
    }
}

pub fn save_to_json_string(state: &GameState) -> io::Result<String> {
    serde_json::to_string(&SaveRecord::from_state(state))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn load_from_json_string(json: &str, data: &GameData) -> io::Result<GameState> {
    let record: SaveRecord =
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(record.restore_state(data))
}

/// Somewhere a [`SaveRecord`] can be kept between sessions.
pub trait SaveStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> io::Result<Option<SaveRecord>>;
    fn save(&mut self, record: &SaveRecord) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// In-memory store holding the serialized JSON, for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    writes: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw JSON, valid or not.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            writes: 0,
        }
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> io::Result<Option<SaveRecord>> {
        match &self.json {
            None => Ok(None),
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }

    fn save(&mut self, record: &SaveRecord) -> io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.json = Some(json);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.json = None;
        Ok(())
    }
}

/// Manages saving and loading the record with a checksummed file format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager writing to the default save directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            save_path: save_path(&format!("{SAVE_KEY}.dat"))?,
        })
    }

    /// Creates a SaveManager for an explicit file path.
    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "bounty-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&temp_dir)?;

        Ok(Self::with_path(temp_dir.join("save.dat")))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    fn write_record(&self, record: &SaveRecord) -> io::Result<()> {
        let payload =
            serde_json::to_vec(record).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let bytes = seal(&payload)?;
        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.save_path, &bytes)?;
        debug!(path = %self.save_path.display(), bytes = bytes.len(), "saved");
        Ok(())
    }

    fn read_record(&self) -> io::Result<SaveRecord> {
        let bytes = fs::read(&self.save_path)?;
        let payload = open(&bytes)?;
        serde_json::from_slice(payload).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC_LEN + LENGTH_LEN;

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Wraps `payload` in the on-disk envelope.
///
/// Layout, little-endian:
/// - version magic (8 bytes)
/// - payload length (4 bytes)
/// - payload
/// - SHA-256 over everything before it (32 bytes)
fn seal(payload: &[u8]) -> io::Result<Vec<u8>> {
    let length = u32::try_from(payload.len())
        .map_err(|_| invalid(format!("save payload too large: {} bytes", payload.len())))?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&length.to_le_bytes());
    bytes.extend_from_slice(payload);
    let digest = Sha256::digest(&bytes);
    bytes.extend_from_slice(&digest);
    Ok(bytes)
}

/// Verifies an envelope and returns the payload inside it.
fn open(bytes: &[u8]) -> io::Result<&[u8]> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(invalid(format!("save file too short: {} bytes", bytes.len())));
    }
    let (magic, rest) = bytes.split_at(MAGIC_LEN);
    let mut magic_bytes = [0u8; MAGIC_LEN];
    magic_bytes.copy_from_slice(magic);
    let version = u64::from_le_bytes(magic_bytes);
    if version != SAVE_VERSION_MAGIC {
        return Err(invalid(format!(
            "unknown save version 0x{version:016X}, expected 0x{SAVE_VERSION_MAGIC:016X}"
        )));
    }

    let mut length_bytes = [0u8; LENGTH_LEN];
    length_bytes.copy_from_slice(&rest[..LENGTH_LEN]);
    let length = u32::from_le_bytes(length_bytes) as usize;
    let expected_len = HEADER_LEN + length + CHECKSUM_LEN;
    if bytes.len() != expected_len {
        return Err(invalid(format!(
            "save file is {} bytes, header says {expected_len}",
            bytes.len()
        )));
    }

    let (body, checksum) = bytes.split_at(HEADER_LEN + length);
    if Sha256::digest(body).as_slice() != checksum {
        return Err(invalid("save checksum mismatch".to_string()));
    }
    Ok(&body[HEADER_LEN..])
}

impl SaveStore for SaveManager {
    fn load(&self) -> io::Result<Option<SaveRecord>> {
        if !self.save_exists() {
            return Ok(None);
        }
        self.read_record().map(Some)
    }

    fn save(&mut self, record: &SaveRecord) -> io::Result<()> {
        self.write_record(record)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
