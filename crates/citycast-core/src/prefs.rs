//! Best-effort persistence for user preferences.
//!
//! Three independent JSON records live under the preference directory:
//! the selected city list, the city count, and the display toggles. Each
//! record is read and written on its own; a corrupt or missing record falls
//! back to its default without affecting the other two, and a failed save is
//! logged and swallowed so it never blocks an in-memory state change.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Slot selection seeded on first run.
pub const DEFAULT_CITIES: [&str; 3] = ["athens-ga", "new-york-ny", "chicago-il"];

/// Number of visible slots on first run.
pub const DEFAULT_CITY_COUNT: usize = 3;

/// Smallest accepted city count.
pub const MIN_CITY_COUNT: usize = 1;

/// Largest accepted city count.
pub const MAX_CITY_COUNT: usize = 6;

const SELECTION_FILE: &str = "selected_cities.json";
const CITY_COUNT_FILE: &str = "city_count.json";
const DISPLAY_PREFS_FILE: &str = "display_prefs.json";

/// Per-section display toggles for a weather card.
///
/// The flags are independent; every combination is valid. Per-field serde
/// defaults mean a partially-valid stored record is repaired by overlaying it
/// onto the defaults: missing keys are filled in, unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrefs {
    #[serde(default = "enabled")]
    pub show_current_temp: bool,
    #[serde(default = "enabled")]
    pub show_hourly_chart: bool,
    #[serde(default = "enabled")]
    pub show_daily_chart: bool,
    #[serde(default = "enabled")]
    pub show_daily_table: bool,
}

fn enabled() -> bool {
    true
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            show_current_temp: true,
            show_hourly_chart: true,
            show_daily_chart: true,
            show_daily_table: true,
        }
    }
}

/// The default slot selection as an owned list.
pub fn default_selection() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|s| s.to_string()).collect()
}

/// File-backed store for the three preference records.
#[derive(Debug, Clone)]
pub struct PrefStore {
    dir: PathBuf,
}

impl PrefStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Selected city ids, one entry per slot (an empty string marks an empty
    /// slot). Returns the default seed cities when the record is absent or
    /// not an array of strings.
    pub fn load_selection(&self) -> Vec<String> {
        self.read_record::<Vec<String>>(SELECTION_FILE)
            .unwrap_or_else(default_selection)
    }

    pub fn save_selection(&self, selection: &[String]) {
        self.write_record(SELECTION_FILE, &selection);
    }

    /// Number of visible slots. A stored value outside 1..=6, or one that is
    /// not an integer at all, is discarded in favor of the default.
    pub fn load_city_count(&self) -> usize {
        match self.read_record::<usize>(CITY_COUNT_FILE) {
            Some(n) if (MIN_CITY_COUNT..=MAX_CITY_COUNT).contains(&n) => n,
            Some(n) => {
                tracing::warn!("Discarding out-of-range stored city count {}", n);
                DEFAULT_CITY_COUNT
            }
            None => DEFAULT_CITY_COUNT,
        }
    }

    pub fn save_city_count(&self, count: usize) {
        self.write_record(CITY_COUNT_FILE, &count);
    }

    /// Display toggles, repaired onto the defaults when partially valid.
    pub fn load_display_prefs(&self) -> DisplayPrefs {
        self.read_record(DISPLAY_PREFS_FILE).unwrap_or_default()
    }

    pub fn save_display_prefs(&self, prefs: &DisplayPrefs) {
        self.write_record(DISPLAY_PREFS_FILE, prefs);
    }

    /// Remove all three records.
    pub fn clear(&self) {
        for file in [SELECTION_FILE, CITY_COUNT_FILE, DISPLAY_PREFS_FILE] {
            let path = self.dir.join(file);
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }

    fn read_record<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                }
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt record {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_record<T: Serialize + ?Sized>(&self, file: &str, value: &T) {
        if let Err(e) = self.try_write(file, value) {
            tracing::warn!("Failed to persist {}: {}", file, e);
        }
    }

    fn try_write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create preference directory")?;

        let json = serde_json::to_string_pretty(value).context("Failed to serialize record")?;

        fs::write(self.dir.join(file), json).context("Failed to write record")?;
        Ok(())
    }
}
