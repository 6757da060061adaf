//! In-memory selection state: city count, ordered slots, display toggles.
//!
//! Transitions are pure and return whether they were accepted; the caller
//! persists after each accepted transition. Two invariants hold after every
//! mutation: `slots.len() == city_count`, and no non-empty city id occupies
//! more than one slot.

use citycast_core::prefs::{DisplayPrefs, PrefStore, MAX_CITY_COUNT, MIN_CITY_COUNT};

#[derive(Debug, Clone)]
pub struct SelectionState {
    city_count: usize,
    slots: Vec<String>,
    display: DisplayPrefs,
}

impl SelectionState {
    /// Build from raw records, reconciling a selection whose length drifted
    /// from the count (the records are persisted independently, so one write
    /// can succeed while the other fails).
    pub fn new(city_count: usize, mut slots: Vec<String>, display: DisplayPrefs) -> Self {
        let city_count = city_count.clamp(MIN_CITY_COUNT, MAX_CITY_COUNT);
        slots.resize(city_count, String::new());

        Self {
            city_count,
            slots,
            display,
        }
    }

    /// Build from persisted records (or their defaults).
    pub fn from_store(store: &PrefStore) -> Self {
        Self::new(
            store.load_city_count(),
            store.load_selection(),
            store.load_display_prefs(),
        )
    }

    pub fn city_count(&self) -> usize {
        self.city_count
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// The city id at a slot, `None` past the current count.
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    pub fn display(&self) -> &DisplayPrefs {
        &self.display
    }

    /// The non-empty selected ids, order preserved. Distinct by invariant.
    pub fn active_ids(&self) -> Vec<String> {
        self.slots.iter().filter(|s| !s.is_empty()).cloned().collect()
    }

    /// Whether a city id is currently held by any slot.
    pub fn is_selected(&self, city_id: &str) -> bool {
        !city_id.is_empty() && self.slots.iter().any(|s| s == city_id)
    }

    /// Assign a city to a slot. When the city already occupies a different
    /// slot, that slot is vacated first, so selecting a city elsewhere moves
    /// it rather than duplicating it. An empty id clears the slot.
    ///
    /// Returns false (no mutation) for an out-of-range index.
    pub fn set_slot(&mut self, index: usize, city_id: &str) -> bool {
        if index >= self.city_count {
            return false;
        }

        if !city_id.is_empty() {
            if let Some(other) = self.slots.iter().position(|s| s == city_id) {
                if other != index {
                    self.slots[other] = String::new();
                }
            }
        }

        self.slots[index] = city_id.to_string();
        true
    }

    /// Change the number of visible slots. Growing appends empty slots;
    /// shrinking truncates from the tail, discarding those selections. Both
    /// fields update in the same call so readers never observe a length
    /// mismatch.
    ///
    /// Returns false (no mutation) for a count outside 1..=6.
    pub fn set_city_count(&mut self, count: usize) -> bool {
        if !(MIN_CITY_COUNT..=MAX_CITY_COUNT).contains(&count) {
            return false;
        }

        self.city_count = count;
        self.slots.resize(count, String::new());
        true
    }

    /// Replace the display toggles wholesale.
    pub fn set_display_prefs(&mut self, display: DisplayPrefs) {
        self.display = display;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(
            citycast_core::prefs::DEFAULT_CITY_COUNT,
            citycast_core::prefs::default_selection(),
            DisplayPrefs::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn state_with(slots: &[&str]) -> SelectionState {
        SelectionState::new(
            slots.len(),
            slots.iter().map(|s| s.to_string()).collect(),
            DisplayPrefs::default(),
        )
    }

    #[test]
    fn test_set_slot_assigns() {
        let mut state = state_with(&["", "", ""]);
        assert!(state.set_slot(1, "athens-ga"));
        assert_eq!(state.slots(), &["", "athens-ga", ""]);
    }

    #[test]
    fn test_set_slot_out_of_range_rejected() {
        let mut state = state_with(&["athens-ga", "", ""]);
        assert!(!state.set_slot(3, "chicago-il"));
        assert_eq!(state.slots(), &["athens-ga", "", ""]);
    }

    #[test]
    fn test_set_slot_moves_duplicate() {
        let mut state = state_with(&["athens-ga", "new-york-ny", ""]);
        assert!(state.set_slot(2, "athens-ga"));
        assert_eq!(state.slots(), &["", "new-york-ny", "athens-ga"]);
    }

    #[test]
    fn test_set_slot_same_index_is_stable() {
        let mut state = state_with(&["athens-ga", "", ""]);
        assert!(state.set_slot(0, "athens-ga"));
        assert_eq!(state.slots(), &["athens-ga", "", ""]);
    }

    #[test]
    fn test_clear_slot() {
        let mut state = state_with(&["athens-ga", "new-york-ny", ""]);
        assert!(state.set_slot(0, ""));
        assert_eq!(state.slots(), &["", "new-york-ny", ""]);
    }

    #[test]
    fn test_grow_count_pads_with_empty() {
        let mut state = state_with(&["athens-ga", "new-york-ny", "chicago-il"]);
        assert!(state.set_city_count(5));
        assert_eq!(state.city_count(), 5);
        assert_eq!(state.slots(), &["athens-ga", "new-york-ny", "chicago-il", "", ""]);
    }

    #[test]
    fn test_shrink_count_truncates_tail() {
        let mut state = state_with(&["athens-ga", "new-york-ny", "chicago-il"]);
        assert!(state.set_city_count(1));
        assert_eq!(state.city_count(), 1);
        assert_eq!(state.slots(), &["athens-ga"]);
    }

    #[test]
    fn test_count_out_of_range_leaves_state_unchanged() {
        let mut state = state_with(&["athens-ga", "new-york-ny", "chicago-il"]);
        assert!(!state.set_city_count(0));
        assert!(!state.set_city_count(7));
        assert_eq!(state.city_count(), 3);
        assert_eq!(state.slots().len(), 3);
    }

    #[test]
    fn test_resize_preserves_surviving_prefix() {
        for count in 1..=6usize {
            let mut state = state_with(&["a", "b", "c"]);
            assert!(state.set_city_count(count));
            assert_eq!(state.slots().len(), count);
            for (i, expected) in ["a", "b", "c"].iter().enumerate().take(count.min(3)) {
                assert_eq!(state.slot(i), Some(*expected));
            }
        }
    }

    #[test]
    fn test_reconciles_longer_selection_against_count() {
        // Persisted selection of 4 with a persisted count of 3: the 4th
        // entry is dropped before first use.
        let state = SelectionState::new(
            3,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            DisplayPrefs::default(),
        );
        assert_eq!(state.slots(), &["a", "b", "c"]);
    }

    #[test]
    fn test_reconciles_shorter_selection_against_count() {
        let state = SelectionState::new(4, vec!["a".into()], DisplayPrefs::default());
        assert_eq!(state.slots(), &["a", "", "", ""]);
    }

    #[test]
    fn test_active_ids_skips_empty_preserves_order() {
        let state = state_with(&["", "chicago-il", "", "athens-ga"]);
        assert_eq!(state.active_ids(), vec!["chicago-il".to_string(), "athens-ga".to_string()]);
    }

    #[test]
    fn test_is_selected() {
        let state = state_with(&["athens-ga", "", ""]);
        assert!(state.is_selected("athens-ga"));
        assert!(!state.is_selected("chicago-il"));
        assert!(!state.is_selected(""));
    }

    #[test]
    fn test_display_prefs_full_replacement() {
        let mut state = state_with(&[""]);
        let prefs = DisplayPrefs {
            show_current_temp: false,
            show_hourly_chart: false,
            show_daily_chart: false,
            show_daily_table: false,
        };
        state.set_display_prefs(prefs.clone());
        assert_eq!(state.display(), &prefs);
    }
}
